//! Sub-party registry: farms managed under a party.

use std::sync::Arc;

use sqlx::{sqlite::SqliteRow, Row};

use super::AccountRegistry;
use crate::db::{new_record_id, timestamp_now, Database};
use crate::errors::AppError;
use crate::models::{CreateSubPartyRequest, SubParty};

/// Owns sub-party records.
#[derive(Clone)]
pub struct SubPartyRegistry {
    db: Database,
    accounts: Arc<AccountRegistry>,
}

impl SubPartyRegistry {
    pub fn new(db: Database, accounts: Arc<AccountRegistry>) -> Self {
        Self { db, accounts }
    }

    /// Create a sub-party under an existing parent party.
    pub async fn create_sub_party(
        &self,
        request: &CreateSubPartyRequest,
    ) -> Result<SubParty, AppError> {
        let new_sub_party = request.validate()?;

        if self
            .accounts
            .find_by_party_id(&new_sub_party.parent_party_id)
            .await?
            .is_none()
        {
            tracing::warn!(parent_party_id = %new_sub_party.parent_party_id, "Parent party not found");
            return Err(AppError::NotFound {
                message: "Parent party not found".to_string(),
                reference: Some(("parentPartyId", new_sub_party.parent_party_id)),
            });
        }

        let now = timestamp_now();
        let sub_party = SubParty {
            id: new_record_id(),
            party_name: new_sub_party.party_name,
            farm: new_sub_party.farm,
            phone_number: new_sub_party.phone_number,
            parent_party_id: new_sub_party.parent_party_id,
            created_at: now.clone(),
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO sub_parties (id, party_name, farm, phone_number, parent_party_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&sub_party.id)
        .bind(&sub_party.party_name)
        .bind(&sub_party.farm)
        .bind(&sub_party.phone_number)
        .bind(&sub_party.parent_party_id)
        .bind(&sub_party.created_at)
        .bind(&sub_party.updated_at)
        .execute(self.db.pool())
        .await?;

        tracing::info!(id = %sub_party.id, parent_party_id = %sub_party.parent_party_id, "Sub-party created");
        Ok(sub_party)
    }

    /// All sub-parties registered under `parent_party_id`; empty if none.
    pub async fn list_by_parent(&self, parent_party_id: &str) -> Result<Vec<SubParty>, AppError> {
        let rows = sqlx::query(
            "SELECT id, party_name, farm, phone_number, parent_party_id, created_at, updated_at FROM sub_parties WHERE parent_party_id = ? ORDER BY created_at, rowid",
        )
        .bind(parent_party_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(sub_party_from_row).collect())
    }
}

fn sub_party_from_row(row: &SqliteRow) -> SubParty {
    SubParty {
        id: row.get("id"),
        party_name: row.get("party_name"),
        farm: row.get("farm"),
        phone_number: row.get("phone_number"),
        parent_party_id: row.get("parent_party_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
