//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_claims::ClaimError;
use domain_pricing::PricingError;
use domain_warranty::WarrantyError;

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg)
            }
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<WarrantyError> for ApiError {
    fn from(err: WarrantyError) -> Self {
        match err {
            WarrantyError::Validation(_)
            | WarrantyError::InvalidImei(_)
            | WarrantyError::MissingGrade
            | WarrantyError::PlanMismatch(_) => ApiError::Validation(err.to_string()),
            WarrantyError::DuplicateImei(_)
            | WarrantyError::InvalidStatusTransition { .. }
            | WarrantyError::ClaimAlreadyOpen
            | WarrantyError::PendingOrderMismatch => ApiError::Conflict(err.to_string()),
            WarrantyError::NotFound(_) => ApiError::NotFound(err.to_string()),
            WarrantyError::PaymentDeclined(_) => ApiError::BadRequest(err.to_string()),
            WarrantyError::PaymentGateway(_) => ApiError::BadGateway(err.to_string()),
            WarrantyError::Forbidden { .. } => ApiError::Forbidden(err.to_string()),
            WarrantyError::Pricing(inner) => inner.into(),
            WarrantyError::Temporal(_) => ApiError::Internal(err.to_string()),
            WarrantyError::Store(inner) => inner.into(),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::ClaimNotFound(_)
            | ClaimError::ReportNotFound(_)
            | ClaimError::CoverageNotFound(_) => ApiError::NotFound(err.to_string()),
            ClaimError::InvalidStatusTransition { .. }
            | ClaimError::CoverageNotActive(_)
            | ClaimError::CoverageExpired
            | ClaimError::ClaimAlreadyOpen => ApiError::Conflict(err.to_string()),
            ClaimError::CustomerMismatch | ClaimError::Validation(_) => {
                ApiError::Validation(err.to_string())
            }
            ClaimError::Forbidden { .. } => ApiError::Forbidden(err.to_string()),
            ClaimError::Warranty(inner) => inner.into(),
            ClaimError::Store(inner) => inner.into(),
        }
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::PlanNotFound(_) => ApiError::NotFound(err.to_string()),
            PricingError::InvalidDevicePrice(_)
            | PricingError::CurrencyMismatch { .. }
            | PricingError::UnknownGrade(_)
            | PricingError::UnknownTerm(_) => ApiError::Validation(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match &err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { .. } => ApiError::Validation(err.to_string()),
            PortError::Conflict { .. } => ApiError::Conflict(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        ApiError::Unauthorized
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}
