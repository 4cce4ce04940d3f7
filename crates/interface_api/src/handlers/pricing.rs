//! Pricing handlers

use axum::{
    extract::{Query, State},
    response::Json,
};

use core_kernel::Money;
use domain_pricing::{Grade, PlanTerm};

use crate::dto::pricing::{PlanListParams, PlanResponse, QuoteParams, QuoteResponse};
use crate::error::ApiError;
use crate::AppState;

/// Lists the standard plan book, optionally filtered by grade
pub async fn list_plans(
    State(state): State<AppState>,
    Query(params): Query<PlanListParams>,
) -> Result<Json<Vec<PlanResponse>>, ApiError> {
    let plans: Vec<PlanResponse> = match params.grade.as_deref() {
        Some(raw) => {
            let grade = raw.parse::<Grade>()?;
            state.plans.plans_for(grade).map(PlanResponse::from).collect()
        }
        None => state.plans.iter().map(PlanResponse::from).collect(),
    };

    Ok(Json(plans))
}

/// Quotes a warranty price for a device
///
/// Never refuses a device price; every price resolves to some tier.
pub async fn quote(
    State(state): State<AppState>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let grade = params
        .grade
        .as_deref()
        .map(|g| g.parse::<Grade>())
        .transpose()?;
    let term = match params.term_months {
        Some(months) => PlanTerm::try_from(months)?,
        None => PlanTerm::TwelveMonths,
    };

    let quote = state
        .catalog
        .quote(&Money::inr(params.device_price), grade, term)?;

    Ok(Json(QuoteResponse::from(quote)))
}
