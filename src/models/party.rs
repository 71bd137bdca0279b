//! Party (account holder) model.

use serde::{Deserialize, Serialize};

use super::wire::text_or_number;
use super::RequiredFields;
use crate::errors::AppError;

/// An account holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(rename = "_id")]
    pub id: String,
    pub party_name: String,
    pub email: String,
    pub phone_number: String,
    /// Caller-chosen login id, unique across parties
    pub party_id: String,
    pub password: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Party as returned by the listing endpoint: no internal id, no timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySummary {
    pub party_name: String,
    pub email: String,
    pub phone_number: String,
    pub party_id: String,
    pub password: String,
}

impl From<Party> for PartySummary {
    fn from(party: Party) -> Self {
        Self {
            party_name: party.party_name,
            email: party.email,
            phone_number: party.phone_number,
            party_id: party.party_id,
            password: party.password,
        }
    }
}

/// Request body for creating a party.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartyRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub party_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub password: Option<String>,
}

/// A party creation request that passed the required-field check.
#[derive(Debug, Clone)]
pub struct NewParty {
    pub party_name: String,
    pub email: String,
    pub phone_number: String,
    pub party_id: String,
    pub password: String,
}

impl CreatePartyRequest {
    pub fn validate(&self) -> Result<NewParty, AppError> {
        let mut required = RequiredFields::new();
        let party_name = required.text("partyName", &self.party_name);
        let email = required.text("email", &self.email);
        let phone_number = required.text("phoneNumber", &self.phone_number);
        let party_id = required.text("id", &self.id);
        let password = required.text("password", &self.password);

        match (party_name, email, phone_number, party_id, password) {
            (Some(party_name), Some(email), Some(phone_number), Some(party_id), Some(password)) => {
                Ok(NewParty {
                    party_name,
                    email,
                    phone_number,
                    party_id,
                    password,
                })
            }
            _ => Err(required.into_error()),
        }
    }
}

/// Request body for `POST /api/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub password: Option<String>,
}
