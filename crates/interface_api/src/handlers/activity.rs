//! Activity feed handlers

use axum::{
    extract::{Query, State},
    response::Json,
    Extension,
};

use core_kernel::Actor;

use crate::dto::activity::{ActivityParams, ActivityResponse};
use crate::error::ApiError;
use crate::AppState;

const DEFAULT_LIMIT: usize = 50;

/// Returns the most recent activity records, newest first
///
/// Admin only; the feed spans every actor on the platform.
pub async fn recent_activity(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ActivityParams>,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    if !actor.is_admin() {
        return Err(ApiError::Forbidden(
            "The activity feed requires the admin role".to_string(),
        ));
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let records = state.activity.recent(limit).await?;
    let responses = records.iter().map(ActivityResponse::from).collect();

    Ok(Json(responses))
}
