//! Claims Management Domain
//!
//! This crate implements the device claim lifecycle from filing through the
//! admin decision, keyed to the issued warranty the claim draws on.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> Processing -> Approved/Rejected
//! ```
//!
//! A submitted claim may also be approved or rejected directly. A decided
//! claim is immutable; a rejected claim frees the coverage so a fresh claim
//! can be filed against it.

pub mod claim;
pub mod error;
pub mod events;
pub mod ports;
pub mod services;

pub use claim::{Claim, ClaimStatus};
pub use error::ClaimError;
pub use events::ClaimEvent;
pub use ports::{ClaimQuery, ClaimStore};
pub use services::{ClaimService, NewClaim};
