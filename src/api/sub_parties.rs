//! Sub-party API endpoints.

use axum::extract::{Path, State};
use serde::Serialize;

use super::{created, ok, ApiJson, ApiResult};
use crate::models::{CreateSubPartyRequest, SubParty};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SubPartyResponse {
    pub message: &'static str,
    pub party: SubParty,
}

/// POST /api/parties/add - Register a farm under a parent party.
pub async fn create_sub_party(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSubPartyRequest>,
) -> ApiResult<SubPartyResponse> {
    tracing::debug!(?request, "Incoming sub-party data");

    let sub_party = state
        .sub_parties
        .create_sub_party(&request)
        .await
        .map_err(|e| e.context("Error adding party information"))?;

    created(SubPartyResponse {
        message: "Party information added successfully",
        party: sub_party,
    })
}

/// GET /api/parties/:parentPartyId - List the farms of a parent party.
pub async fn list_sub_parties(
    State(state): State<AppState>,
    Path(parent_party_id): Path<String>,
) -> ApiResult<Vec<SubParty>> {
    let sub_parties = state
        .sub_parties
        .list_by_parent(&parent_party_id)
        .await
        .map_err(|e| e.context("Error fetching parties"))?;

    ok(sub_parties)
}
