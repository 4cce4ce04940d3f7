//! Pricing Domain
//!
//! This crate implements warranty pricing for the platform: device prices map
//! onto contiguous price bands, each band carries a price per plan term, and
//! condition grades apply a loading on top of the base schedule.
//!
//! # Resolution policy
//!
//! A device price always resolves to exactly one tier. Bands partition the
//! price line from zero upward with no gaps or overlaps (validated at
//! construction), and the top band is open-ended, so a price above every
//! bounded band still quotes from the highest tier rather than being refused.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_pricing::{Grade, PlanTerm, PricingCatalog};
//!
//! let catalog = PricingCatalog::standard();
//! let quote = catalog.quote(
//!     &Money::inr(dec!(24_999)),
//!     Some(Grade::A),
//!     PlanTerm::TwelveMonths,
//! )?;
//! assert_eq!(quote.price, Money::inr(dec!(899)));
//! ```

pub mod catalog;
pub mod error;
pub mod grade;
pub mod plan;
pub mod tier;

pub use catalog::PricingCatalog;
pub use error::PricingError;
pub use grade::Grade;
pub use plan::{PlanBook, PlanQuote, PlanTerm, WarrantyPlan};
pub use tier::{PlanRate, PriceBand, PricingTier, TierSchedule};
