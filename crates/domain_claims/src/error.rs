//! Claims domain errors

use thiserror::Error;

use core_kernel::{PortError, Role};
use domain_warranty::WarrantyError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Inspection report not found: {0}")]
    ReportNotFound(String),

    #[error("No warranty coverage found for {0}")]
    CoverageNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Coverage is not claimable: {0}")]
    CoverageNotActive(String),

    #[error("Coverage has expired")]
    CoverageExpired,

    #[error("A claim is already open for this warranty")]
    ClaimAlreadyOpen,

    #[error("Claimant does not match the warranty holder")]
    CustomerMismatch,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Operation requires the {required} role")]
    Forbidden { required: Role },

    #[error(transparent)]
    Warranty(#[from] WarrantyError),

    #[error("Store error: {0}")]
    Store(PortError),
}

impl ClaimError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }
}

impl From<PortError> for ClaimError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => {
                ClaimError::ClaimNotFound(format!("{} {}", entity_type, id))
            }
            other => ClaimError::Store(other),
        }
    }
}
