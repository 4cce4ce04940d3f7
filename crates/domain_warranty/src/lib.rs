//! Device Warranty Domain
//!
//! This crate implements the warranty half of the platform: inspection
//! reports, the warranty purchase lifecycle, and issued coverage. It follows
//! Domain-Driven Design and Hexagonal Architecture principles.
//!
//! # Architecture
//!
//! The domain layer is infrastructure-agnostic, containing only business logic:
//! - **Aggregates**: InspectionReport is the main aggregate root; IssuedWarranty
//!   is created by a confirmed purchase
//! - **Value Objects**: Imei, DeviceDetails, ConditionReport, PaymentReference
//! - **Domain Services**: WarrantyService orchestrates the lifecycle against
//!   the store and payment gateway ports
//! - **Domain Events**: InspectionSubmitted, PurchaseStarted, WarrantyPurchased,
//!   WarrantyActivated, FineIssued
//!
//! # Warranty Lifecycle
//!
//! ```text
//! NotPurchased -> Processing -> Purchased -> Activated
//! ```
//!
//! The status only moves forward; Activated is terminal, and whether coverage
//! has expired is derived from the coverage period at read time.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_warranty::{InspectionReportBuilder, Imei};
//!
//! let report = InspectionReportBuilder::new()
//!     .imei(Imei::parse("356938035643809")?)
//!     .device("Samsung", "Galaxy S21", price)
//!     .grade(Grade::A)
//!     .condition(condition)
//!     .checked_by(inspector_id)
//!     .build()?;
//! ```

pub mod error;
pub mod events;
pub mod imei;
pub mod ports;
pub mod report;
pub mod services;
pub mod warranty;

pub use error::WarrantyError;
pub use events::WarrantyEvent;
pub use imei::{Imei, ImeiError};
pub use ports::{PaymentGatewayPort, PaymentVerdict, WarrantyStore};
pub use report::{
    ConditionReport, DeviceDetails, FineStatus, InspectionReport, InspectionReportBuilder,
    SurfaceCondition, WarrantyStatus,
};
pub use services::{NewInspection, PurchaseIntent, WarrantyService};
pub use warranty::{CoverageClaimStatus, CoverageStanding, IssuedWarranty, PaymentReference};
