//! Warranty persistence and payment ports
//!
//! Adapters implement these traits; the domain service only ever talks to
//! the traits. Mutating store methods return the persisted aggregate so
//! callers always hold the stored version.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{DomainPort, PortError, ReportId, WarrantyId};

use crate::imei::Imei;
use crate::report::InspectionReport;
use crate::warranty::{IssuedWarranty, PaymentReference};

/// Storage port for inspection reports and issued warranties
///
/// Updates are version-checked: writing an aggregate whose version does not
/// match the stored one fails with `PortError::Conflict`. `commit_purchase`
/// persists the report transition and the new warranty as one atomic write,
/// so no observer can see a purchased report without its warranty.
#[async_trait]
pub trait WarrantyStore: DomainPort {
    /// Inserts a new report; duplicate IMEIs are rejected with a conflict
    async fn insert_report(
        &self,
        report: InspectionReport,
    ) -> Result<InspectionReport, PortError>;

    /// Fetches a report by ID
    async fn get_report(&self, id: ReportId) -> Result<InspectionReport, PortError>;

    /// Fetches a report by device IMEI
    async fn get_report_by_imei(&self, imei: &Imei) -> Result<InspectionReport, PortError>;

    /// Lists all reports, newest first
    async fn list_reports(&self) -> Result<Vec<InspectionReport>, PortError>;

    /// Persists a report update, checking the version
    async fn update_report(
        &self,
        report: InspectionReport,
    ) -> Result<InspectionReport, PortError>;

    /// Deletes a report; only legal while no warranty has been purchased
    async fn delete_report(&self, id: ReportId) -> Result<(), PortError>;

    /// Atomically persists a confirmed purchase: the report update and the
    /// newly issued warranty in one write
    async fn commit_purchase(
        &self,
        report: InspectionReport,
        warranty: IssuedWarranty,
    ) -> Result<(InspectionReport, IssuedWarranty), PortError>;

    /// Fetches a warranty by ID
    async fn get_warranty(&self, id: WarrantyId) -> Result<IssuedWarranty, PortError>;

    /// Fetches the warranty issued for a report
    async fn get_warranty_for_report(
        &self,
        report_id: ReportId,
    ) -> Result<IssuedWarranty, PortError>;

    /// Persists a warranty update, checking the version
    async fn update_warranty(
        &self,
        warranty: IssuedWarranty,
    ) -> Result<IssuedWarranty, PortError>;
}

/// Outcome of a payment confirmation
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentVerdict {
    /// The gateway captured the payment
    Captured {
        /// When the payment was confirmed
        confirmed_at: DateTime<Utc>,
    },
    /// The gateway declined the payment
    Declined {
        /// Gateway-reported reason
        reason: String,
    },
}

/// Payment gateway port
///
/// A declined verdict is a business outcome; transport and gateway failures
/// surface as `PortError` and fail the purchase without changing the report.
#[async_trait]
pub trait PaymentGatewayPort: DomainPort {
    /// Confirms that the referenced payment was captured
    async fn confirm(&self, reference: &PaymentReference) -> Result<PaymentVerdict, PortError>;
}
