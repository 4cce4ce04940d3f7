//! Warranty store adapter
//!
//! Implements the `WarrantyStore` port over the shared in-memory store.
//! Reports are keyed by ID with a unique index on IMEI; warranties are keyed
//! by ID with a link back to their report. `commit_purchase` writes the
//! report transition and the new warranty under one lock.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError, ReportId, WarrantyId};
use domain_warranty::{Imei, InspectionReport, IssuedWarranty, WarrantyStore};

use crate::memory::{check_version, MemoryStore};

/// In-memory implementation of the warranty store port
#[derive(Debug, Clone)]
pub struct MemoryWarrantyStore {
    store: Arc<MemoryStore>,
}

impl MemoryWarrantyStore {
    /// Creates a new adapter over the shared store
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl DomainPort for MemoryWarrantyStore {}

#[async_trait]
impl WarrantyStore for MemoryWarrantyStore {
    #[instrument(skip(self, report), fields(report_id = %report.id(), imei = %report.imei()))]
    async fn insert_report(
        &self,
        report: InspectionReport,
    ) -> Result<InspectionReport, PortError> {
        debug!("Inserting inspection report");
        let mut inner = self.store.inner.write().await;

        if inner.reports.contains_key(&report.id()) {
            return Err(PortError::conflict(format!(
                "report {} already exists",
                report.id()
            )));
        }
        if inner.imei_index.contains_key(report.imei().as_str()) {
            return Err(PortError::conflict(format!(
                "IMEI {} already has an inspection report",
                report.imei()
            )));
        }

        inner
            .imei_index
            .insert(report.imei().as_str().to_string(), report.id());
        inner.reports.insert(report.id(), report.clone());
        Ok(report)
    }

    async fn get_report(&self, id: ReportId) -> Result<InspectionReport, PortError> {
        let inner = self.store.inner.read().await;
        inner
            .reports
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("InspectionReport", id))
    }

    async fn get_report_by_imei(&self, imei: &Imei) -> Result<InspectionReport, PortError> {
        let inner = self.store.inner.read().await;
        let id = inner
            .imei_index
            .get(imei.as_str())
            .ok_or_else(|| PortError::not_found("InspectionReport", imei))?;
        inner
            .reports
            .get(id)
            .cloned()
            .ok_or_else(|| PortError::not_found("InspectionReport", id))
    }

    async fn list_reports(&self) -> Result<Vec<InspectionReport>, PortError> {
        let inner = self.store.inner.read().await;
        let mut reports: Vec<InspectionReport> = inner.reports.values().cloned().collect();
        reports.sort_by_key(|report| std::cmp::Reverse(report.created_at()));
        Ok(reports)
    }

    #[instrument(skip(self, report), fields(report_id = %report.id()))]
    async fn update_report(
        &self,
        mut report: InspectionReport,
    ) -> Result<InspectionReport, PortError> {
        debug!("Updating inspection report");
        let mut inner = self.store.inner.write().await;

        let stored = inner
            .reports
            .get(&report.id())
            .ok_or_else(|| PortError::not_found("InspectionReport", report.id()))?;
        check_version(stored.version(), report.version(), "report")?;

        report.bump_version();
        inner.reports.insert(report.id(), report.clone());
        Ok(report)
    }

    #[instrument(skip(self), fields(report_id = %id))]
    async fn delete_report(&self, id: ReportId) -> Result<(), PortError> {
        debug!("Deleting inspection report");
        let mut inner = self.store.inner.write().await;

        let report = inner
            .reports
            .get(&id)
            .ok_or_else(|| PortError::not_found("InspectionReport", id))?;
        if !report.is_deletable() {
            return Err(PortError::conflict("report has a warranty purchase"));
        }

        let imei = report.imei().as_str().to_string();
        inner.reports.remove(&id);
        inner.imei_index.remove(&imei);
        Ok(())
    }

    #[instrument(
        skip(self, report, warranty),
        fields(report_id = %report.id(), warranty_id = %warranty.id())
    )]
    async fn commit_purchase(
        &self,
        mut report: InspectionReport,
        warranty: IssuedWarranty,
    ) -> Result<(InspectionReport, IssuedWarranty), PortError> {
        debug!("Committing warranty purchase");
        let mut inner = self.store.inner.write().await;

        let stored = inner
            .reports
            .get(&report.id())
            .ok_or_else(|| PortError::not_found("InspectionReport", report.id()))?;
        check_version(stored.version(), report.version(), "report")?;

        if inner.warranties.contains_key(&warranty.id()) {
            return Err(PortError::conflict(format!(
                "warranty {} already exists",
                warranty.id()
            )));
        }
        if inner.warranty_by_report.contains_key(&report.id()) {
            return Err(PortError::conflict(format!(
                "report {} already has a warranty",
                report.id()
            )));
        }

        report.bump_version();
        inner.reports.insert(report.id(), report.clone());
        inner.warranty_by_report.insert(report.id(), warranty.id());
        inner.warranties.insert(warranty.id(), warranty.clone());
        Ok((report, warranty))
    }

    async fn get_warranty(&self, id: WarrantyId) -> Result<IssuedWarranty, PortError> {
        let inner = self.store.inner.read().await;
        inner
            .warranties
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("IssuedWarranty", id))
    }

    async fn get_warranty_for_report(
        &self,
        report_id: ReportId,
    ) -> Result<IssuedWarranty, PortError> {
        let inner = self.store.inner.read().await;
        let id = inner
            .warranty_by_report
            .get(&report_id)
            .ok_or_else(|| PortError::not_found("IssuedWarranty", report_id))?;
        inner
            .warranties
            .get(id)
            .cloned()
            .ok_or_else(|| PortError::not_found("IssuedWarranty", id))
    }

    #[instrument(skip(self, warranty), fields(warranty_id = %warranty.id()))]
    async fn update_warranty(
        &self,
        mut warranty: IssuedWarranty,
    ) -> Result<IssuedWarranty, PortError> {
        debug!("Updating warranty");
        let mut inner = self.store.inner.write().await;

        let stored = inner
            .warranties
            .get(&warranty.id())
            .ok_or_else(|| PortError::not_found("IssuedWarranty", warranty.id()))?;
        check_version(stored.version(), warranty.version(), "warranty")?;

        warranty.bump_version();
        inner.warranties.insert(warranty.id(), warranty.clone());
        Ok(warranty)
    }
}
