//! Account registry: party creation, listing and login.

use std::sync::Arc;

use sqlx::{sqlite::SqliteRow, Row};

use crate::auth::CredentialVerifier;
use crate::db::{new_record_id, timestamp_now, Database};
use crate::errors::AppError;
use crate::models::{CreatePartyRequest, LoginRequest, Party, PartySummary};

pub const DUPLICATE_PARTY: &str = "A party with this email or ID already exists";

/// Owns party records.
#[derive(Clone)]
pub struct AccountRegistry {
    db: Database,
    verifier: Arc<dyn CredentialVerifier>,
}

impl AccountRegistry {
    pub fn new(db: Database, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { db, verifier }
    }

    /// Create a party after checking that neither its email nor its id is taken.
    pub async fn create_account(&self, request: &CreatePartyRequest) -> Result<Party, AppError> {
        let new_party = request.validate()?;

        let existing = sqlx::query("SELECT id FROM parties WHERE email = ? OR party_id = ? LIMIT 1")
            .bind(&new_party.email)
            .bind(&new_party.party_id)
            .fetch_optional(self.db.pool())
            .await?;

        if existing.is_some() {
            tracing::info!(party_id = %new_party.party_id, "Duplicate party rejected");
            return Err(AppError::Conflict(DUPLICATE_PARTY.to_string()));
        }

        let now = timestamp_now();
        let party = Party {
            id: new_record_id(),
            party_name: new_party.party_name,
            email: new_party.email,
            phone_number: new_party.phone_number,
            party_id: new_party.party_id,
            password: self.verifier.encode(&new_party.password),
            created_at: now.clone(),
            updated_at: now,
        };

        let result = sqlx::query(
            "INSERT INTO parties (id, party_name, email, phone_number, party_id, password, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&party.id)
        .bind(&party.party_name)
        .bind(&party.email)
        .bind(&party.phone_number)
        .bind(&party.party_id)
        .bind(&party.password)
        .bind(&party.created_at)
        .bind(&party.updated_at)
        .execute(self.db.pool())
        .await;

        match result {
            Ok(_) => {
                tracing::info!(party_id = %party.party_id, "Party created");
                Ok(party)
            }
            // Lost a race against a concurrent create with the same email or id
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::info!(party_id = %party.party_id, "Duplicate party rejected on insert");
                Err(AppError::Conflict(DUPLICATE_PARTY.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List every party without its internal id.
    pub async fn list_accounts(&self) -> Result<Vec<PartySummary>, AppError> {
        let rows = sqlx::query(
            "SELECT party_name, email, phone_number, party_id, password FROM parties ORDER BY created_at, rowid",
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| PartySummary {
                party_name: row.get("party_name"),
                email: row.get("email"),
                phone_number: row.get("phone_number"),
                party_id: row.get("party_id"),
                password: row.get("password"),
            })
            .collect())
    }

    /// Look up a party by its caller-chosen id.
    pub async fn find_by_party_id(&self, party_id: &str) -> Result<Option<Party>, AppError> {
        let row = sqlx::query(
            "SELECT id, party_name, email, phone_number, party_id, password, created_at, updated_at FROM parties WHERE party_id = ?",
        )
        .bind(party_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(party_from_row))
    }

    /// Check a login attempt and return the matching party.
    pub async fn authenticate(&self, request: &LoginRequest) -> Result<Party, AppError> {
        let id = request.id.as_deref().filter(|v| !v.trim().is_empty());
        let password = request.password.as_deref().filter(|v| !v.trim().is_empty());

        let (Some(id), Some(password)) = (id, password) else {
            return Err(AppError::validation("ID and Password are required"));
        };

        let party = self
            .find_by_party_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Party not found"))?;

        if !self.verifier.verify(&party.password, password) {
            tracing::info!(party_id = %id, "Login rejected: invalid credentials");
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(party)
    }
}

fn party_from_row(row: &SqliteRow) -> Party {
    Party {
        id: row.get("id"),
        party_name: row.get("party_name"),
        email: row.get("email"),
        phone_number: row.get("phone_number"),
        party_id: row.get("party_id"),
        password: row.get("password"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
