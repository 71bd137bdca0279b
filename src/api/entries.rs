//! Party/vendor entry API endpoint.

use axum::extract::State;
use serde::Serialize;

use super::{created, ApiJson, ApiResult};
use crate::models::{CreateEntryRequest, PartyVendorEntry};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub message: &'static str,
    pub entry: PartyVendorEntry,
}

/// POST /api/party-vendor-entries - Record a transaction line.
pub async fn create_entry(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEntryRequest>,
) -> ApiResult<EntryResponse> {
    tracing::debug!(?request, "Incoming entry data");

    let entry = state
        .entries
        .create_entry(&request)
        .await
        .map_err(|e| e.context("Error saving entry"))?;

    created(EntryResponse {
        message: "Entry saved successfully",
        entry,
    })
}
