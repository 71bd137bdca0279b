//! Credential checking for party login.
//!
//! Password storage and comparison live behind [`CredentialVerifier`] so the
//! account registry never touches the stored representation directly.

use subtle::ConstantTimeEq;

/// Turns raw passwords into their stored form and checks login attempts against it.
pub trait CredentialVerifier: Send + Sync {
    /// Produce the value persisted for a newly created account.
    fn encode(&self, raw: &str) -> String;

    /// Check a supplied password against the stored value.
    fn verify(&self, stored: &str, supplied: &str) -> bool;
}

/// Stores passwords as given and compares them by exact equality.
///
/// Matches the existing account data, which holds plaintext passwords. Swap in a
/// salted-hash verifier once stored accounts have been migrated.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn encode(&self, raw: &str) -> String {
        raw.to_string()
    }

    fn verify(&self, stored: &str, supplied: &str) -> bool {
        constant_time_compare(stored, supplied)
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
