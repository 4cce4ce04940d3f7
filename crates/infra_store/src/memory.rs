//! Shared in-memory document store
//!
//! The platform persists aggregates as whole documents. This module holds
//! the collections that the per-domain adapters in [`crate::adapters`] hang
//! off. One `RwLock` guards all of them, so a multi-document commit is a
//! single write-lock acquisition and readers never see half of one.

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use core_kernel::{
    ActivityRecord, AdapterHealth, ClaimId, HealthCheckResult, HealthCheckable, PortError,
    ReportId, WarrantyId,
};
use domain_claims::Claim;
use domain_warranty::{InspectionReport, IssuedWarranty};

/// In-memory document store shared by the domain adapters
///
/// Construct one per process, wrap it in an `Arc`, and hand clones to the
/// adapters. Inserts persist aggregates as built; updates are version-checked
/// and advance the aggregate's counter on success.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
pub(crate) struct StoreInner {
    pub(crate) reports: HashMap<ReportId, InspectionReport>,
    pub(crate) imei_index: HashMap<String, ReportId>,
    pub(crate) warranties: HashMap<WarrantyId, IssuedWarranty>,
    pub(crate) warranty_by_report: HashMap<ReportId, WarrantyId>,
    pub(crate) claims: HashMap<ClaimId, Claim>,
    pub(crate) activity: Vec<ActivityRecord>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held across all collections
    pub async fn document_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.reports.len() + inner.warranties.len() + inner.claims.len() + inner.activity.len()
    }
}

/// Rejects writes whose version does not match the stored aggregate
pub(crate) fn check_version(stored: u32, incoming: u32, entity: &str) -> Result<(), PortError> {
    if stored != incoming {
        return Err(PortError::conflict(format!(
            "stale {} write: stored version {}, incoming version {}",
            entity, stored, incoming
        )));
    }
    Ok(())
}

#[async_trait]
impl HealthCheckable for MemoryStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let documents = self.document_count().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        HealthCheckResult {
            adapter_id: "memory-store".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: Some(format!("documents held: {}", documents)),
            checked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_version_accepts_match() {
        assert!(check_version(3, 3, "report").is_ok());
    }

    #[test]
    fn test_check_version_rejects_stale_write() {
        let error = check_version(4, 3, "warranty").unwrap_err();
        assert!(error.is_conflict());
        assert!(error.to_string().contains("warranty"));
    }

    #[tokio::test]
    async fn test_empty_store_is_healthy() {
        let store = MemoryStore::new();
        let health = store.health_check().await;

        assert_eq!(health.adapter_id, "memory-store");
        assert_eq!(health.status, AdapterHealth::Healthy);
        assert_eq!(health.message.as_deref(), Some("documents held: 0"));
    }
}
