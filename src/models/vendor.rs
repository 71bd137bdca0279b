//! Vendor model.

use serde::{Deserialize, Serialize};

use super::wire::text_or_number;
use super::RequiredFields;
use crate::errors::AppError;

/// A supply source registered under a party.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(rename = "_id")]
    pub id: String,
    pub vendor_name: String,
    pub farm: String,
    pub phone_number: String,
    pub party_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for `POST /api/vendors`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendorRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub vendor_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub farm: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub party_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewVendor {
    pub vendor_name: String,
    pub farm: String,
    pub phone_number: String,
    pub party_id: String,
}

impl CreateVendorRequest {
    pub fn validate(&self) -> Result<NewVendor, AppError> {
        let mut required = RequiredFields::new();
        let vendor_name = required.text("vendorName", &self.vendor_name);
        let farm = required.text("farm", &self.farm);
        let phone_number = required.text("phoneNumber", &self.phone_number);
        let party_id = required.text("partyId", &self.party_id);

        match (vendor_name, farm, phone_number, party_id) {
            (Some(vendor_name), Some(farm), Some(phone_number), Some(party_id)) => Ok(NewVendor {
                vendor_name,
                farm,
                phone_number,
                party_id,
            }),
            _ => Err(required.into_error()),
        }
    }
}
