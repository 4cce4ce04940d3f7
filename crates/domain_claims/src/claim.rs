//! Claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, CustomerId, ReportId, UserId, WarrantyId};
use domain_warranty::Imei;

use crate::error::ClaimError;
use crate::events::ClaimEvent;

/// Claim status
///
/// Serialized with the English state names the platform exposes:
/// `Submitted`, `Processing`, `Approved`, `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Filed and awaiting review
    Submitted,
    /// Under admin review
    Processing,
    /// Decided in the customer's favour; consumes the coverage
    Approved,
    /// Decided against the customer; the coverage may be claimed again
    Rejected,
}

impl ClaimStatus {
    pub fn name(&self) -> &'static str {
        match self {
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::Processing => "Processing",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }

    /// Returns true once a final decision has been recorded
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }
}

/// A claim filed against an issued warranty
///
/// The aggregate owns its status machine: `Submitted` is the only entry
/// state, and `transition_to` is the only mutator. `Approved` and `Rejected`
/// are terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    id: ClaimId,
    /// Operator-facing claim number
    claim_number: String,
    /// Inspection report the claim traces back to
    report_id: ReportId,
    /// Warranty the claim draws on
    warranty_id: WarrantyId,
    /// Covered device IMEI
    imei: Imei,
    /// Warranty holder
    customer_id: CustomerId,
    /// User who filed the claim
    filed_by: UserId,
    /// What went wrong with the device
    issue_description: String,
    /// Current status
    status: ClaimStatus,
    /// Note recorded with the most recent decision
    decision_note: Option<String>,
    /// Admin who made the most recent decision
    decided_by: Option<UserId>,
    /// When the most recent decision was made
    decided_at: Option<DateTime<Utc>>,
    /// Events pending dispatch
    #[serde(skip)]
    events: Vec<ClaimEvent>,
    /// Version for optimistic concurrency
    version: u32,
    /// Created timestamp
    created_at: DateTime<Utc>,
    /// Updated timestamp
    updated_at: DateTime<Utc>,
}

impl Claim {
    /// Files a new claim in the `Submitted` state
    ///
    /// # Errors
    ///
    /// Returns error if the issue description is blank
    pub fn submit(
        report_id: ReportId,
        warranty_id: WarrantyId,
        imei: Imei,
        customer_id: CustomerId,
        filed_by: UserId,
        issue_description: impl Into<String>,
    ) -> Result<Self, ClaimError> {
        let issue_description = issue_description.into();
        if issue_description.trim().is_empty() {
            return Err(ClaimError::validation("Issue description is required"));
        }

        let now = Utc::now();
        let id = ClaimId::new_v7();

        Ok(Self {
            id,
            claim_number: generate_claim_number(),
            report_id,
            warranty_id,
            imei,
            customer_id,
            filed_by,
            issue_description,
            status: ClaimStatus::Submitted,
            decision_note: None,
            decided_by: None,
            decided_at: None,
            events: vec![ClaimEvent::ClaimSubmitted {
                claim_id: id,
                report_id,
                customer_id,
                timestamp: now,
            }],
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the claim ID
    pub fn id(&self) -> ClaimId {
        self.id
    }

    /// Returns the operator-facing claim number
    pub fn claim_number(&self) -> &str {
        &self.claim_number
    }

    /// Returns the originating report ID
    pub fn report_id(&self) -> ReportId {
        self.report_id
    }

    /// Returns the warranty the claim draws on
    pub fn warranty_id(&self) -> WarrantyId {
        self.warranty_id
    }

    /// Returns the covered device IMEI
    pub fn imei(&self) -> &Imei {
        &self.imei
    }

    /// Returns the warranty holder
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the user who filed the claim
    pub fn filed_by(&self) -> UserId {
        self.filed_by
    }

    /// Returns the issue description
    pub fn issue_description(&self) -> &str {
        &self.issue_description
    }

    /// Returns the current status
    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    /// Returns the note recorded with the most recent decision
    pub fn decision_note(&self) -> Option<&str> {
        self.decision_note.as_deref()
    }

    /// Returns the admin who made the most recent decision
    pub fn decided_by(&self) -> Option<UserId> {
        self.decided_by
    }

    /// Returns when the most recent decision was made
    pub fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }

    /// Returns the optimistic-concurrency version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns the creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Advances the version; stores call this when persisting an update
    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    /// Takes all pending events, leaving the aggregate's list empty
    pub fn take_events(&mut self) -> Vec<ClaimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Moves the claim to a new status
    ///
    /// The transition table:
    /// - `Submitted -> Processing | Approved | Rejected`
    /// - `Processing -> Approved | Rejected`
    ///
    /// # Errors
    ///
    /// Returns error if the target is not reachable from the current status
    pub fn transition_to(
        &mut self,
        target: ClaimStatus,
        decided_by: UserId,
        note: Option<String>,
    ) -> Result<(), ClaimError> {
        if !self.can_transition_to(target) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.name().to_string(),
                to: target.name().to_string(),
            });
        }

        let from = self.status;
        let now = Utc::now();
        self.status = target;
        self.decision_note = note;
        self.decided_by = Some(decided_by);
        self.decided_at = Some(now);
        self.updated_at = now;
        self.events.push(ClaimEvent::ClaimDecided {
            claim_id: self.id,
            from,
            to: target,
            decided_by,
            timestamp: now,
        });
        Ok(())
    }

    /// Checks if transition is valid
    fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target),
            (Submitted, Processing)
                | (Submitted, Approved)
                | (Submitted, Rejected)
                | (Processing, Approved)
                | (Processing, Rejected)
        )
    }
}

fn generate_claim_number() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("CLM-{}", duration.as_millis() % 10_000_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_claim() -> Claim {
        Claim::submit(
            ReportId::new_v7(),
            WarrantyId::new_v7(),
            Imei::parse("356938035643809").unwrap(),
            CustomerId::new_v7(),
            UserId::new_v7(),
            "Screen flickers after minor drop",
        )
        .unwrap()
    }

    #[test]
    fn test_new_claim_is_submitted() {
        let claim = test_claim();
        assert_eq!(claim.status(), ClaimStatus::Submitted);
        assert!(claim.claim_number().starts_with("CLM-"));
        assert_eq!(claim.version(), 1);
        assert!(claim.decided_by().is_none());
    }

    #[test]
    fn test_blank_description_rejected() {
        let result = Claim::submit(
            ReportId::new_v7(),
            WarrantyId::new_v7(),
            Imei::parse("356938035643809").unwrap(),
            CustomerId::new_v7(),
            UserId::new_v7(),
            "   ",
        );
        assert!(matches!(result, Err(ClaimError::Validation(_))));
    }

    #[test]
    fn test_submitted_may_move_to_processing() {
        let mut claim = test_claim();
        claim
            .transition_to(ClaimStatus::Processing, UserId::new_v7(), None)
            .unwrap();
        assert_eq!(claim.status(), ClaimStatus::Processing);
        assert!(claim.decided_at().is_some());
    }

    #[test]
    fn test_submitted_may_be_decided_directly() {
        let mut approved = test_claim();
        approved
            .transition_to(ClaimStatus::Approved, UserId::new_v7(), None)
            .unwrap();
        assert_eq!(approved.status(), ClaimStatus::Approved);

        let mut rejected = test_claim();
        rejected
            .transition_to(ClaimStatus::Rejected, UserId::new_v7(), None)
            .unwrap();
        assert_eq!(rejected.status(), ClaimStatus::Rejected);
    }

    #[test]
    fn test_decision_records_admin_and_note() {
        let mut claim = test_claim();
        let admin = UserId::new_v7();
        claim
            .transition_to(
                ClaimStatus::Approved,
                admin,
                Some("Replacement authorised".to_string()),
            )
            .unwrap();

        assert_eq!(claim.decided_by(), Some(admin));
        assert_eq!(claim.decision_note(), Some("Replacement authorised"));
    }

    #[test]
    fn test_terminal_states_allow_no_further_transitions() {
        for terminal in [ClaimStatus::Approved, ClaimStatus::Rejected] {
            let mut claim = test_claim();
            claim
                .transition_to(terminal, UserId::new_v7(), None)
                .unwrap();

            for target in [
                ClaimStatus::Submitted,
                ClaimStatus::Processing,
                ClaimStatus::Approved,
                ClaimStatus::Rejected,
            ] {
                let result = claim.transition_to(target, UserId::new_v7(), None);
                assert!(
                    matches!(result, Err(ClaimError::InvalidStatusTransition { .. })),
                    "{:?} -> {:?} must be rejected",
                    terminal,
                    target
                );
            }
        }
    }

    #[test]
    fn test_no_route_back_to_submitted() {
        let mut claim = test_claim();
        claim
            .transition_to(ClaimStatus::Processing, UserId::new_v7(), None)
            .unwrap();
        let result = claim.transition_to(ClaimStatus::Submitted, UserId::new_v7(), None);
        assert!(matches!(
            result,
            Err(ClaimError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_failed_transition_changes_nothing() {
        let mut claim = test_claim();
        claim.take_events();
        let updated_at = claim.updated_at();

        let result = claim.transition_to(ClaimStatus::Submitted, UserId::new_v7(), None);
        assert!(result.is_err());
        assert_eq!(claim.status(), ClaimStatus::Submitted);
        assert_eq!(claim.updated_at(), updated_at);
        assert!(claim.take_events().is_empty());
    }

    #[test]
    fn test_events_track_the_lifecycle() {
        let mut claim = test_claim();
        let events = claim.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ClaimEvent::ClaimSubmitted { .. }));

        claim
            .transition_to(ClaimStatus::Processing, UserId::new_v7(), None)
            .unwrap();
        let events = claim.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ClaimEvent::ClaimDecided {
                from: ClaimStatus::Submitted,
                to: ClaimStatus::Processing,
                ..
            }
        ));
    }

    #[test]
    fn test_status_serializes_with_english_names() {
        assert_eq!(
            serde_json::to_string(&ClaimStatus::Submitted).unwrap(),
            "\"Submitted\""
        );
        assert_eq!(
            serde_json::to_string(&ClaimStatus::Rejected).unwrap(),
            "\"Rejected\""
        );
        let back: ClaimStatus = serde_json::from_str("\"Processing\"").unwrap();
        assert_eq!(back, ClaimStatus::Processing);
    }

    #[test]
    fn test_terminal_predicate() {
        assert!(!ClaimStatus::Submitted.is_terminal());
        assert!(!ClaimStatus::Processing.is_terminal());
        assert!(ClaimStatus::Approved.is_terminal());
        assert!(ClaimStatus::Rejected.is_terminal());
    }
}
