//! Party API endpoints: account creation, listing and login.

use axum::extract::State;
use serde::Serialize;

use super::{created, ok, ApiJson, ApiResult};
use crate::models::{CreatePartyRequest, LoginRequest, Party, PartySummary};
use crate::AppState;

/// `{message, party}` body returned by account creation and login.
#[derive(Debug, Serialize)]
pub struct PartyResponse {
    pub message: &'static str,
    pub party: Party,
}

/// POST /api/parties - Create a party account.
pub async fn create_party(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreatePartyRequest>,
) -> ApiResult<PartyResponse> {
    tracing::debug!(
        party_id = ?request.id,
        email = ?request.email,
        party_name = ?request.party_name,
        "Incoming party data"
    );

    let party = state
        .accounts
        .create_account(&request)
        .await
        .map_err(|e| e.context("Error creating party"))?;

    created(PartyResponse {
        message: "Party created successfully",
        party,
    })
}

/// GET /api/parties - List all parties.
pub async fn list_parties(State(state): State<AppState>) -> ApiResult<Vec<PartySummary>> {
    let parties = state
        .accounts
        .list_accounts()
        .await
        .map_err(|e| e.context("Error fetching parties"))?;

    ok(parties)
}

/// POST /api/login - Check a party's id and password.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<PartyResponse> {
    let party = state
        .accounts
        .authenticate(&request)
        .await
        .map_err(|e| e.context("Error during login"))?;

    tracing::info!(party_id = %party.party_id, "Login successful");
    ok(PartyResponse {
        message: "Login successful",
        party,
    })
}
