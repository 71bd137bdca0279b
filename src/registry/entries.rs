//! Entry ledger: dated party/vendor transaction lines.
//!
//! Entries are write-only from the API's point of view. Their `partyId`,
//! `subPartyId` and `vendorId` are stored as given without existence checks.

use crate::db::{new_record_id, timestamp_now, Database};
use crate::errors::AppError;
use crate::models::{format_entry_date, CreateEntryRequest, PartyVendorEntry};

/// Owns party/vendor entry records.
#[derive(Clone)]
pub struct EntryLedger {
    db: Database,
    allow_zero_amounts: bool,
}

impl EntryLedger {
    pub fn new(db: Database, allow_zero_amounts: bool) -> Self {
        Self {
            db,
            allow_zero_amounts,
        }
    }

    pub async fn create_entry(
        &self,
        request: &CreateEntryRequest,
    ) -> Result<PartyVendorEntry, AppError> {
        let new_entry = request.validate(self.allow_zero_amounts)?;

        let now = timestamp_now();
        let entry = PartyVendorEntry {
            id: new_record_id(),
            party_id: new_entry.party_id,
            sub_party_id: new_entry.sub_party_id,
            vendor_id: new_entry.vendor_id,
            date: format_entry_date(&new_entry.date),
            name: new_entry.name,
            quantity: new_entry.quantity,
            price: new_entry.price,
            created_at: now.clone(),
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO party_vendor_entries (id, party_id, sub_party_id, vendor_id, date, name, quantity, price, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.party_id)
        .bind(&entry.sub_party_id)
        .bind(&entry.vendor_id)
        .bind(&entry.date)
        .bind(&entry.name)
        .bind(entry.quantity)
        .bind(entry.price)
        .bind(&entry.created_at)
        .bind(&entry.updated_at)
        .execute(self.db.pool())
        .await?;

        tracing::info!(id = %entry.id, party_id = %entry.party_id, "Entry saved");
        Ok(entry)
    }
}
