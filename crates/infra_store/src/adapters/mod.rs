//! Domain store adapters
//!
//! This module provides adapter implementations for the domain store ports,
//! connecting the port traits to the shared in-memory document store.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements one domain's port trait
//! - Reads and writes whole documents in the shared [`crate::MemoryStore`]
//! - Applies the version check on every update-style write
//! - Takes a single write lock for multi-document commits
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_store::{MemoryStore, MemoryWarrantyStore};
//! use domain_warranty::WarrantyStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let warranties: Arc<dyn WarrantyStore> = Arc::new(MemoryWarrantyStore::new(store));
//! ```

pub mod activity;
pub mod claims;
pub mod warranty;

pub use activity::MemoryActivityLog;
pub use claims::MemoryClaimStore;
pub use warranty::MemoryWarrantyStore;
