//! Claim lifecycle handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Actor, ClaimId};

use crate::dto::claims::{
    ClaimListParams, ClaimResponse, DecideClaimRequest, SubmitClaimRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Files a claim against an active warranty
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    request.validate()?;
    let claim = state.claims.submit_claim(&actor, request.into_input()).await?;

    Ok((StatusCode::CREATED, Json(ClaimResponse::from(&claim))))
}

/// Lists claims, newest first, with optional filters
pub async fn list_claims(
    State(state): State<AppState>,
    Query(params): Query<ClaimListParams>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.list_claims(params.into_query()).await?;
    let responses = claims.iter().map(ClaimResponse::from).collect();

    Ok(Json(responses))
}

/// Fetches a single claim
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.claim(ClaimId::from_uuid(id)).await?;
    Ok(Json(ClaimResponse::from(&claim)))
}

/// Moves a claim through its lifecycle
pub async fn update_status(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<DecideClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    request.validate()?;
    let claim = state
        .claims
        .set_claim_status(&actor, ClaimId::from_uuid(id), request.status, request.note)
        .await?;

    Ok(Json(ClaimResponse::from(&claim)))
}
