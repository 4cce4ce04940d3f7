//! Domain events for the claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ActivityAction, ClaimId, CustomerId, ReportId, UserId};

use crate::claim::ClaimStatus;

/// Domain events emitted by the Claim aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClaimEvent {
    /// A new claim was filed against an issued warranty
    ClaimSubmitted {
        claim_id: ClaimId,
        report_id: ReportId,
        customer_id: CustomerId,
        timestamp: DateTime<Utc>,
    },

    /// An admin moved the claim to a new status
    ClaimDecided {
        claim_id: ClaimId,
        from: ClaimStatus,
        to: ClaimStatus,
        decided_by: UserId,
        timestamp: DateTime<Utc>,
    },
}

impl ClaimEvent {
    /// Returns the claim ID this event relates to
    pub fn claim_id(&self) -> ClaimId {
        match self {
            ClaimEvent::ClaimSubmitted { claim_id, .. } => *claim_id,
            ClaimEvent::ClaimDecided { claim_id, .. } => *claim_id,
        }
    }

    /// Returns the event timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ClaimEvent::ClaimSubmitted { timestamp, .. } => *timestamp,
            ClaimEvent::ClaimDecided { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ClaimEvent::ClaimSubmitted { .. } => "ClaimSubmitted",
            ClaimEvent::ClaimDecided { .. } => "ClaimDecided",
        }
    }

    /// Returns the audit action this event records as
    pub fn activity_action(&self) -> ActivityAction {
        match self {
            ClaimEvent::ClaimSubmitted { .. } => ActivityAction::ClaimSubmitted,
            ClaimEvent::ClaimDecided { .. } => ActivityAction::ClaimDecided,
        }
    }
}
