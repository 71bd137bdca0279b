//! Data models for the party ledger.
//!
//! Records serialize with the camelCase field names existing clients already use,
//! and expose their generated identifier as `_id`.

mod entry;
mod party;
mod sub_party;
mod validation;
mod vendor;
mod wire;

pub use entry::*;
pub use party::*;
pub use sub_party::*;
pub use validation::*;
pub use vendor::*;
