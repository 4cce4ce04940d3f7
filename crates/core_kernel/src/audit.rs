//! Append-only activity log
//!
//! Every state-changing operation appends exactly one `ActivityRecord` after
//! its primary transition commits. Records are never mutated or deleted;
//! corrections append new records. A failed append must not fail or roll back
//! the operation that produced it; callers log the failure and move on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actor::{Actor, Role};
use crate::identifiers::{ActivityId, CustomerId, UserId};
use crate::ports::{DomainPort, PortError};

/// The kind of state-changing action a record captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    InspectionSubmitted,
    PurchaseStarted,
    WarrantyPurchased,
    WarrantyActivated,
    FineIssued,
    ClaimSubmitted,
    ClaimDecided,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::InspectionSubmitted => "inspection_submitted",
            ActivityAction::PurchaseStarted => "purchase_started",
            ActivityAction::WarrantyPurchased => "warranty_purchased",
            ActivityAction::WarrantyActivated => "warranty_activated",
            ActivityAction::FineIssued => "fine_issued",
            ActivityAction::ClaimSubmitted => "claim_submitted",
            ActivityAction::ClaimDecided => "claim_decided",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single audit record: who did what to which entity, and what it became
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: ActivityId,
    pub actor_id: UserId,
    pub actor_role: Role,
    pub action: ActivityAction,
    /// IMEI of the device involved, when the action concerns one
    pub imei: Option<String>,
    pub customer_id: Option<CustomerId>,
    /// Display id of the primary entity (report, warranty, or claim)
    pub entity: String,
    /// Status the entity ended up in, in wire form
    pub resulting_status: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn new(actor: &Actor, action: ActivityAction, entity: impl fmt::Display) -> Self {
        Self {
            id: ActivityId::new_v7(),
            actor_id: actor.user_id,
            actor_role: actor.role,
            action,
            imei: None,
            customer_id: None,
            entity: entity.to_string(),
            resulting_status: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_imei(mut self, imei: impl Into<String>) -> Self {
        self.imei = Some(imei.into());
        self
    }

    pub fn with_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.resulting_status = Some(status.into());
        self
    }
}

/// Port for the append-only activity log
#[async_trait]
pub trait ActivityLogPort: DomainPort {
    /// Appends one record; never updates or deletes
    async fn append(&self, record: ActivityRecord) -> Result<(), PortError>;

    /// Returns the most recent records, newest first
    async fn recent(&self, limit: usize) -> Result<Vec<ActivityRecord>, PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder_chain() {
        let actor = Actor::phone_checker(UserId::new());
        let customer = CustomerId::new();
        let record = ActivityRecord::new(&actor, ActivityAction::InspectionSubmitted, "RPT-1")
            .with_imei("356938035643809")
            .with_customer(customer)
            .with_status("not-purchased");

        assert_eq!(record.actor_role, Role::PhoneChecker);
        assert_eq!(record.imei.as_deref(), Some("356938035643809"));
        assert_eq!(record.customer_id, Some(customer));
        assert_eq!(record.resulting_status.as_deref(), Some("not-purchased"));
    }

    #[test]
    fn test_action_wire_names() {
        assert_eq!(ActivityAction::WarrantyPurchased.as_str(), "warranty_purchased");
        assert_eq!(ActivityAction::ClaimDecided.to_string(), "claim_decided");
    }
}
