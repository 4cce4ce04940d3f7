//! Claims domain service
//!
//! The ClaimService orchestrates claim filing and decisions against the claim
//! store, the warranty store and the activity log. Coverage is checked at
//! read time when a claim is filed; expiry is never a stored status. Role
//! checks run before any read or write, and every successful mutation appends
//! exactly one activity record.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use core_kernel::{ActivityLogPort, ActivityRecord, Actor, ClaimId, CustomerId, ReportId, Role};
use domain_warranty::{CoverageClaimStatus, WarrantyStatus, WarrantyStore};

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;
use crate::events::ClaimEvent;
use crate::ports::{ClaimQuery, ClaimStore};

/// Input for filing a new claim
#[derive(Debug, Clone)]
pub struct NewClaim {
    /// Inspection report of the covered device
    pub report_id: ReportId,
    /// The customer claiming against the warranty
    pub customer_id: CustomerId,
    /// What went wrong with the device
    pub issue_description: String,
}

/// Orchestrates the claim lifecycle
pub struct ClaimService {
    claims: Arc<dyn ClaimStore>,
    warranties: Arc<dyn WarrantyStore>,
    activity: Arc<dyn ActivityLogPort>,
}

impl ClaimService {
    /// Creates a new claim service
    pub fn new(
        claims: Arc<dyn ClaimStore>,
        warranties: Arc<dyn WarrantyStore>,
        activity: Arc<dyn ActivityLogPort>,
    ) -> Self {
        Self {
            claims,
            warranties,
            activity,
        }
    }

    /// Files a claim against the warranty covering a report
    ///
    /// Requires the shop-owner role. The coverage must be purchased or
    /// activated, unexpired at the time of filing, held by the claiming
    /// customer, and free of any open or settled claim. The new claim and
    /// the warranty claim flag are committed as one atomic write.
    pub async fn submit_claim(&self, actor: &Actor, input: NewClaim) -> Result<Claim, ClaimError> {
        require_role(actor, Role::ShopOwner)?;

        let report = self
            .warranties
            .get_report(input.report_id)
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    ClaimError::ReportNotFound(input.report_id.to_string())
                } else {
                    ClaimError::Store(err)
                }
            })?;
        let mut warranty = self
            .warranties
            .get_warranty_for_report(report.id())
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    ClaimError::CoverageNotFound(report.id().to_string())
                } else {
                    ClaimError::Store(err)
                }
            })?;

        match report.status() {
            WarrantyStatus::Purchased { .. } | WarrantyStatus::Activated { .. } => {}
            other => {
                return Err(ClaimError::CoverageNotActive(format!(
                    "report is {}",
                    other.name()
                )))
            }
        }
        if warranty.is_expired_at(Utc::now()) {
            return Err(ClaimError::CoverageExpired);
        }
        if warranty.customer_id() != input.customer_id {
            return Err(ClaimError::CustomerMismatch);
        }
        match warranty.claim_status() {
            CoverageClaimStatus::NoClaim => {}
            CoverageClaimStatus::InProgress { .. } => return Err(ClaimError::ClaimAlreadyOpen),
            CoverageClaimStatus::Settled { .. } => {
                return Err(ClaimError::CoverageNotActive(
                    "coverage already settled a claim".to_string(),
                ))
            }
        }

        let mut claim = Claim::submit(
            report.id(),
            warranty.id(),
            warranty.imei().clone(),
            input.customer_id,
            actor.user_id,
            input.issue_description,
        )?;
        warranty.open_claim(claim.id())?;
        let events = claim.take_events();

        let (saved, _) = self.claims.commit_submission(claim, warranty).await?;

        info!(
            claim_id = %saved.id(),
            claim_number = %saved.claim_number(),
            report_id = %saved.report_id(),
            "claim submitted"
        );
        self.record_activity(actor, &saved, &events).await;

        Ok(saved)
    }

    /// Moves a claim to a new status
    ///
    /// Requires the admin role. `Approved` settles the warranty's coverage;
    /// `Rejected` frees it for a fresh claim; `Processing` leaves the claim
    /// open. The claim and the warranty claim flag are committed as one
    /// atomic write.
    pub async fn set_claim_status(
        &self,
        actor: &Actor,
        claim_id: ClaimId,
        target: ClaimStatus,
        note: Option<String>,
    ) -> Result<Claim, ClaimError> {
        require_role(actor, Role::Admin)?;

        let mut claim = self.claims.get_claim(claim_id).await?;
        let mut warranty = self
            .warranties
            .get_warranty(claim.warranty_id())
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    ClaimError::CoverageNotFound(claim.warranty_id().to_string())
                } else {
                    ClaimError::Store(err)
                }
            })?;

        claim.transition_to(target, actor.user_id, note)?;
        match target {
            ClaimStatus::Approved => warranty.settle_claim()?,
            ClaimStatus::Rejected => warranty.clear_claim()?,
            ClaimStatus::Processing | ClaimStatus::Submitted => {}
        }
        let events = claim.take_events();

        let (saved, _) = self.claims.commit_decision(claim, warranty).await?;

        info!(
            claim_id = %saved.id(),
            status = saved.status().name(),
            "claim status updated"
        );
        self.record_activity(actor, &saved, &events).await;

        Ok(saved)
    }

    /// Fetches a claim by ID
    pub async fn claim(&self, claim_id: ClaimId) -> Result<Claim, ClaimError> {
        Ok(self.claims.get_claim(claim_id).await?)
    }

    /// Lists claims matching the query, newest first
    pub async fn list_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.claims.list_claims(query).await?)
    }

    /// Converts drained domain events into activity records
    ///
    /// Append failures are logged and swallowed; the audit trail never fails
    /// a completed operation.
    async fn record_activity(&self, actor: &Actor, claim: &Claim, events: &[ClaimEvent]) {
        for event in events {
            let record = ActivityRecord::new(actor, event.activity_action(), claim.id())
                .with_imei(claim.imei().as_str())
                .with_customer(claim.customer_id())
                .with_status(claim.status().name());

            if let Err(err) = self.activity.append(record).await {
                warn!(
                    error = %err,
                    event = event.event_type(),
                    "failed to append activity record"
                );
            }
        }
    }
}

fn require_role(actor: &Actor, role: Role) -> Result<(), ClaimError> {
    if actor.can_act_as(role) {
        Ok(())
    } else {
        Err(ClaimError::Forbidden { required: role })
    }
}
