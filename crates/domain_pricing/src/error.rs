//! Pricing domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by tier resolution and catalog construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Invalid device price: {0}")]
    InvalidDevicePrice(String),

    #[error("Currency mismatch: catalog is priced in {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    #[error("Tier schedule must contain at least one band")]
    EmptySchedule,

    #[error("Tier schedule must start at zero, found lower bound {0}")]
    UnanchoredSchedule(Decimal),

    #[error("Invalid band: upper bound {upper} below lower bound {lower}")]
    InvalidBand { lower: Decimal, upper: Decimal },

    #[error("Gap between bands: expected lower bound {expected}, found {found}")]
    BandGap { expected: Decimal, found: Decimal },

    #[error("Overlapping bands: expected lower bound {expected}, found {found}")]
    BandOverlap { expected: Decimal, found: Decimal },

    #[error("Only the highest band may be open-ended")]
    UnboundedBandNotLast,

    #[error("Unknown grade: {0}")]
    UnknownGrade(String),

    #[error("No rate for a {0}-month term")]
    UnknownTerm(u32),

    #[error("Plan not found: {0}")]
    PlanNotFound(String),
}
