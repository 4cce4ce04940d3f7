//! Warranty domain errors
//!
//! This module defines all error types that can occur within the
//! device warranty domain.

use thiserror::Error;

use core_kernel::{PortError, Role, TemporalError};
use domain_pricing::PricingError;

use crate::imei::ImeiError;

/// Errors that can occur in the warranty domain
#[derive(Debug, Error)]
pub enum WarrantyError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The supplied IMEI is not a valid 15-digit identifier
    #[error(transparent)]
    InvalidImei(#[from] ImeiError),

    /// Purchase requires the report to carry a device grade
    #[error("Inspection report has no device grade; grading is required before purchase")]
    MissingGrade,

    /// The selected plan does not fit the inspected device
    #[error("Plan does not match the report: {0}")]
    PlanMismatch(String),

    /// An inspection report already exists for this IMEI
    #[error("An inspection report already exists for IMEI {0}")]
    DuplicateImei(String),

    /// Invalid warranty status transition attempted
    #[error("Invalid warranty status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: String,
        to: String,
    },

    /// A claim is already recorded against the warranty
    #[error("A claim is already recorded against this warranty")]
    ClaimAlreadyOpen,

    /// Entity not found
    #[error("{0} not found")]
    NotFound(String),

    /// The payment gateway declined the payment
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    /// The payment gateway could not be reached or failed
    #[error("Payment gateway failure")]
    PaymentGateway(#[source] PortError),

    /// Payment reference does not match the order recorded on the report
    #[error("Payment reference does not match the pending order")]
    PendingOrderMismatch,

    /// Actor lacks the role required for the operation
    #[error("Operation requires the {required} role")]
    Forbidden { required: Role },

    /// Pricing lookup failed
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Coverage period calculation failed
    #[error(transparent)]
    Temporal(#[from] TemporalError),

    /// Storage error
    #[error("Store error: {0}")]
    Store(PortError),
}

impl WarrantyError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        WarrantyError::Validation(message.into())
    }

    /// Creates a not-found error for a named entity
    pub fn not_found(entity: impl std::fmt::Display) -> Self {
        WarrantyError::NotFound(entity.to_string())
    }
}

impl From<PortError> for WarrantyError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => {
                WarrantyError::NotFound(format!("{entity_type} {id}"))
            }
            other => WarrantyError::Store(other),
        }
    }
}
