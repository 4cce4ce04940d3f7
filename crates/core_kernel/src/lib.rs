//! Core Kernel - Foundational types and utilities for the warranty platform
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Coverage periods with timezone-aware expiry
//! - Strongly-typed identifiers and the actor context
//! - The append-only activity log contract
//! - Port infrastructure shared by every adapter

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod actor;
pub mod audit;
pub mod ports;

pub use money::{Currency, Money, MoneyError, Rate};
pub use temporal::{CoveragePeriod, TemporalError, Timezone};
pub use identifiers::{
    ActivityId, ClaimId, CustomerId, PlanId, ReportId, UserId, WarrantyId,
};
pub use actor::{Actor, Role};
pub use audit::{ActivityAction, ActivityLogPort, ActivityRecord};
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
