//! Registries owning each record type.
//!
//! Every registry is built from an injected [`Database`](crate::db::Database)
//! handle. Registries that reference parties hold the [`AccountRegistry`] and
//! check the reference once, at creation.

mod accounts;
mod entries;
mod sub_parties;
mod vendors;

pub use accounts::*;
pub use entries::*;
pub use sub_parties::*;
pub use vendors::*;
