//! Store port for the claims domain
//!
//! Claim decisions touch two documents: the claim itself and the warranty
//! whose claim flag tracks it. The port exposes the two writes as single
//! commit calls so adapters can make them atomic.

use async_trait::async_trait;

use core_kernel::{ClaimId, CustomerId, DomainPort, PortError, ReportId};
use domain_warranty::IssuedWarranty;

use crate::claim::{Claim, ClaimStatus};

/// Filter for claim listings; empty fields match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimQuery {
    pub customer_id: Option<CustomerId>,
    pub report_id: Option<ReportId>,
    pub status: Option<ClaimStatus>,
}

impl ClaimQuery {
    /// Returns true if the claim satisfies every set filter
    pub fn matches(&self, claim: &Claim) -> bool {
        self.customer_id
            .map_or(true, |id| claim.customer_id() == id)
            && self.report_id.map_or(true, |id| claim.report_id() == id)
            && self.status.map_or(true, |status| claim.status() == status)
    }
}

/// Persistence port for claims
///
/// Mutating calls take the aggregate by value and return the persisted copy
/// with its version advanced. Updates are rejected with a conflict when the
/// stored version differs from the one the caller read.
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Fetches a claim by ID
    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Lists claims matching the query, newest first
    async fn list_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError>;

    /// Atomically inserts a new claim and updates the warranty claim flag
    async fn commit_submission(
        &self,
        claim: Claim,
        warranty: IssuedWarranty,
    ) -> Result<(Claim, IssuedWarranty), PortError>;

    /// Atomically persists a claim decision and the warranty claim flag
    async fn commit_decision(
        &self,
        claim: Claim,
        warranty: IssuedWarranty,
    ) -> Result<(Claim, IssuedWarranty), PortError>;
}
