//! Infrastructure Storage Layer
//!
//! This crate provides the storage infrastructure for the warranty platform:
//! versioned in-memory document stores behind the domain port traits, plus
//! the payment gateway adapters.
//!
//! # Architecture
//!
//! All collections live in one [`MemoryStore`] guarded by a single lock, so
//! the multi-document commits the domains rely on (purchase confirmation,
//! claim submission, claim decision) happen in one critical section and
//! readers never observe a half-applied write.
//!
//! Every aggregate carries a version counter. Update-style writes compare
//! the incoming version against the stored one and reject stale writes with
//! a conflict, which gives the services optimistic concurrency control
//! without any locking of their own.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_store::{MemoryStore, MemoryWarrantyStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let warranties = MemoryWarrantyStore::new(store.clone());
//! ```

pub mod memory;
pub mod adapters;
pub mod payments;

pub use memory::MemoryStore;
pub use adapters::{MemoryActivityLog, MemoryClaimStore, MemoryWarrantyStore};
pub use payments::{StaticGateway, TrustedCallbackGateway};
