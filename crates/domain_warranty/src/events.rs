//! Domain events for the inspection report aggregate
//!
//! Events capture the significant state changes of the warranty lifecycle.
//! Services drain them after a successful persist and convert them into
//! activity records for the audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ActivityAction, CustomerId, PlanId, ReportId, UserId, WarrantyId};

/// Domain events emitted by the InspectionReport aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WarrantyEvent {
    /// A new inspection report was submitted
    InspectionSubmitted {
        report_id: ReportId,
        imei: String,
        checked_by: UserId,
        timestamp: DateTime<Utc>,
    },

    /// A warranty purchase was started and is awaiting payment
    PurchaseStarted {
        report_id: ReportId,
        plan_id: PlanId,
        customer_id: CustomerId,
        order_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Payment was confirmed and the warranty issued
    WarrantyPurchased {
        report_id: ReportId,
        warranty_id: WarrantyId,
        customer_id: CustomerId,
        timestamp: DateTime<Utc>,
    },

    /// The purchased warranty was activated
    WarrantyActivated {
        report_id: ReportId,
        warranty_id: WarrantyId,
        timestamp: DateTime<Utc>,
    },

    /// A fine was recorded against the report
    FineIssued {
        report_id: ReportId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl WarrantyEvent {
    /// Returns the report ID associated with this event
    pub fn report_id(&self) -> ReportId {
        match self {
            WarrantyEvent::InspectionSubmitted { report_id, .. } => *report_id,
            WarrantyEvent::PurchaseStarted { report_id, .. } => *report_id,
            WarrantyEvent::WarrantyPurchased { report_id, .. } => *report_id,
            WarrantyEvent::WarrantyActivated { report_id, .. } => *report_id,
            WarrantyEvent::FineIssued { report_id, .. } => *report_id,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            WarrantyEvent::InspectionSubmitted { timestamp, .. } => *timestamp,
            WarrantyEvent::PurchaseStarted { timestamp, .. } => *timestamp,
            WarrantyEvent::WarrantyPurchased { timestamp, .. } => *timestamp,
            WarrantyEvent::WarrantyActivated { timestamp, .. } => *timestamp,
            WarrantyEvent::FineIssued { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            WarrantyEvent::InspectionSubmitted { .. } => "InspectionSubmitted",
            WarrantyEvent::PurchaseStarted { .. } => "PurchaseStarted",
            WarrantyEvent::WarrantyPurchased { .. } => "WarrantyPurchased",
            WarrantyEvent::WarrantyActivated { .. } => "WarrantyActivated",
            WarrantyEvent::FineIssued { .. } => "FineIssued",
        }
    }

    /// Returns the activity action recorded for this event
    pub fn activity_action(&self) -> ActivityAction {
        match self {
            WarrantyEvent::InspectionSubmitted { .. } => ActivityAction::InspectionSubmitted,
            WarrantyEvent::PurchaseStarted { .. } => ActivityAction::PurchaseStarted,
            WarrantyEvent::WarrantyPurchased { .. } => ActivityAction::WarrantyPurchased,
            WarrantyEvent::WarrantyActivated { .. } => ActivityAction::WarrantyActivated,
            WarrantyEvent::FineIssued { .. } => ActivityAction::FineIssued,
        }
    }
}
