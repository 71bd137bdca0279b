//! Vendor registry: supply sources linked to a party.

use std::sync::Arc;

use sqlx::{sqlite::SqliteRow, Row};

use super::AccountRegistry;
use crate::db::{new_record_id, timestamp_now, Database};
use crate::errors::AppError;
use crate::models::{CreateVendorRequest, Vendor};

/// Owns vendor records.
#[derive(Clone)]
pub struct VendorRegistry {
    db: Database,
    accounts: Arc<AccountRegistry>,
}

impl VendorRegistry {
    pub fn new(db: Database, accounts: Arc<AccountRegistry>) -> Self {
        Self { db, accounts }
    }

    /// Create a vendor under an existing party.
    pub async fn create_vendor(&self, request: &CreateVendorRequest) -> Result<Vendor, AppError> {
        let new_vendor = request.validate()?;

        if self
            .accounts
            .find_by_party_id(&new_vendor.party_id)
            .await?
            .is_none()
        {
            tracing::warn!(party_id = %new_vendor.party_id, "Party not found for vendor");
            return Err(AppError::NotFound {
                message: "Party not found".to_string(),
                reference: Some(("partyId", new_vendor.party_id)),
            });
        }

        let now = timestamp_now();
        let vendor = Vendor {
            id: new_record_id(),
            vendor_name: new_vendor.vendor_name,
            farm: new_vendor.farm,
            phone_number: new_vendor.phone_number,
            party_id: new_vendor.party_id,
            created_at: now.clone(),
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO vendors (id, vendor_name, farm, phone_number, party_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&vendor.id)
        .bind(&vendor.vendor_name)
        .bind(&vendor.farm)
        .bind(&vendor.phone_number)
        .bind(&vendor.party_id)
        .bind(&vendor.created_at)
        .bind(&vendor.updated_at)
        .execute(self.db.pool())
        .await?;

        tracing::info!(id = %vendor.id, party_id = %vendor.party_id, "Vendor created");
        Ok(vendor)
    }

    /// All vendors owned by `party_id`; empty if none.
    pub async fn list_by_party(&self, party_id: &str) -> Result<Vec<Vendor>, AppError> {
        let rows = sqlx::query(
            "SELECT id, vendor_name, farm, phone_number, party_id, created_at, updated_at FROM vendors WHERE party_id = ? ORDER BY created_at, rowid",
        )
        .bind(party_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(vendor_from_row).collect())
    }
}

fn vendor_from_row(row: &SqliteRow) -> Vendor {
    Vendor {
        id: row.get("id"),
        vendor_name: row.get("vendor_name"),
        farm: row.get("farm"),
        phone_number: row.get("phone_number"),
        party_id: row.get("party_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
