//! Vendor API endpoints.

use axum::extract::{Path, State};
use serde::Serialize;

use super::{created, ok, ApiJson, ApiResult};
use crate::models::{CreateVendorRequest, Vendor};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct VendorResponse {
    pub message: &'static str,
    pub vendor: Vendor,
}

/// POST /api/vendors - Register a vendor under a party.
pub async fn create_vendor(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateVendorRequest>,
) -> ApiResult<VendorResponse> {
    tracing::debug!(?request, "Incoming vendor data");

    let vendor = state
        .vendors
        .create_vendor(&request)
        .await
        .map_err(|e| e.context("Error creating vendor"))?;

    created(VendorResponse {
        message: "Vendor created successfully",
        vendor,
    })
}

/// GET /api/vendors/:partyId - List the vendors of a party.
pub async fn list_vendors(
    State(state): State<AppState>,
    Path(party_id): Path<String>,
) -> ApiResult<Vec<Vendor>> {
    let vendors = state
        .vendors
        .list_by_party(&party_id)
        .await
        .map_err(|e| e.context("Error fetching vendors"))?;

    ok(vendors)
}
