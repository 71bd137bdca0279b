//! Party/vendor transaction entry model.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::wire::{integral_amount, number_or_text, text_or_number};
use super::RequiredFields;
use crate::errors::AppError;

/// A dated transaction line tying a sub-party and a vendor together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyVendorEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub party_id: String,
    pub sub_party_id: String,
    pub vendor_id: String,
    /// RFC 3339 timestamp
    pub date: String,
    pub name: String,
    #[serde(serialize_with = "integral_amount")]
    pub quantity: f64,
    #[serde(serialize_with = "integral_amount")]
    pub price: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for `POST /api/party-vendor-entries`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub party_id: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub sub_party_id: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub vendor_id: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "number_or_text")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "number_or_text")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewEntry {
    pub party_id: String,
    pub sub_party_id: String,
    pub vendor_id: String,
    pub date: DateTime<Utc>,
    pub name: String,
    pub quantity: f64,
    pub price: f64,
}

impl CreateEntryRequest {
    pub fn validate(&self, allow_zero_amounts: bool) -> Result<NewEntry, AppError> {
        let mut required = RequiredFields::new();
        let party_id = required.text("partyId", &self.party_id);
        let sub_party_id = required.text("subPartyId", &self.sub_party_id);
        let vendor_id = required.text("vendorId", &self.vendor_id);
        let date = required.text("date", &self.date);
        let name = required.text("name", &self.name);
        let quantity = required.amount("quantity", self.quantity, allow_zero_amounts);
        let price = required.amount("price", self.price, allow_zero_amounts);

        match (party_id, sub_party_id, vendor_id, date, name, quantity, price) {
            (
                Some(party_id),
                Some(sub_party_id),
                Some(vendor_id),
                Some(date),
                Some(name),
                Some(quantity),
                Some(price),
            ) => {
                let date =
                    parse_entry_date(&date).ok_or_else(|| AppError::validation(INVALID_DATE))?;
                Ok(NewEntry {
                    party_id,
                    sub_party_id,
                    vendor_id,
                    date,
                    name,
                    quantity,
                    price,
                })
            }
            _ => Err(required.into_error()),
        }
    }
}

pub const INVALID_DATE: &str = "Invalid date";

/// Accepts a bare `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_entry_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn format_entry_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
