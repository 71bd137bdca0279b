//! Sub-party (farm managed by a party) model.

use serde::{Deserialize, Serialize};

use super::wire::text_or_number;
use super::RequiredFields;
use crate::errors::AppError;

/// A farm registered under a party.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubParty {
    #[serde(rename = "_id")]
    pub id: String,
    /// Name of the farm's manager, not the owning account
    pub party_name: String,
    pub farm: String,
    pub phone_number: String,
    /// `partyId` of the owning party, checked only at creation
    pub parent_party_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for `POST /api/parties/add`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubPartyRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub party_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub farm: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub parent_party_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSubParty {
    pub party_name: String,
    pub farm: String,
    pub phone_number: String,
    pub parent_party_id: String,
}

impl CreateSubPartyRequest {
    pub fn validate(&self) -> Result<NewSubParty, AppError> {
        let mut required = RequiredFields::new();
        let party_name = required.text("partyName", &self.party_name);
        let farm = required.text("farm", &self.farm);
        let phone_number = required.text("phoneNumber", &self.phone_number);
        let parent_party_id = required.text("parentPartyId", &self.parent_party_id);

        match (party_name, farm, phone_number, parent_party_id) {
            (Some(party_name), Some(farm), Some(phone_number), Some(parent_party_id)) => {
                Ok(NewSubParty {
                    party_name,
                    farm,
                    phone_number,
                    parent_party_id,
                })
            }
            _ => Err(required.into_error()),
        }
    }
}
