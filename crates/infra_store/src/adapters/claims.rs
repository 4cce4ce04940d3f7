//! Claim store adapter
//!
//! Implements the `ClaimStore` port over the shared in-memory store. Claim
//! commits also write the warranty whose claim flag tracks the claim, both
//! under one lock, so the pair can never diverge mid-write.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_claims::{Claim, ClaimQuery, ClaimStore};
use domain_warranty::IssuedWarranty;

use crate::memory::{check_version, MemoryStore};

/// In-memory implementation of the claim store port
#[derive(Debug, Clone)]
pub struct MemoryClaimStore {
    store: Arc<MemoryStore>,
}

impl MemoryClaimStore {
    /// Creates a new adapter over the shared store
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl DomainPort for MemoryClaimStore {}

#[async_trait]
impl ClaimStore for MemoryClaimStore {
    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
        let inner = self.store.inner.read().await;
        inner
            .claims
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Claim", id))
    }

    async fn list_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError> {
        let inner = self.store.inner.read().await;
        let mut claims: Vec<Claim> = inner
            .claims
            .values()
            .filter(|claim| query.matches(claim))
            .cloned()
            .collect();
        claims.sort_by_key(|claim| std::cmp::Reverse(claim.created_at()));
        Ok(claims)
    }

    #[instrument(
        skip(self, claim, warranty),
        fields(claim_id = %claim.id(), warranty_id = %warranty.id())
    )]
    async fn commit_submission(
        &self,
        claim: Claim,
        mut warranty: IssuedWarranty,
    ) -> Result<(Claim, IssuedWarranty), PortError> {
        debug!("Committing claim submission");
        let mut inner = self.store.inner.write().await;

        if inner.claims.contains_key(&claim.id()) {
            return Err(PortError::conflict(format!(
                "claim {} already exists",
                claim.id()
            )));
        }
        let stored = inner
            .warranties
            .get(&warranty.id())
            .ok_or_else(|| PortError::not_found("IssuedWarranty", warranty.id()))?;
        check_version(stored.version(), warranty.version(), "warranty")?;

        warranty.bump_version();
        inner.warranties.insert(warranty.id(), warranty.clone());
        inner.claims.insert(claim.id(), claim.clone());
        Ok((claim, warranty))
    }

    #[instrument(
        skip(self, claim, warranty),
        fields(claim_id = %claim.id(), status = claim.status().name())
    )]
    async fn commit_decision(
        &self,
        mut claim: Claim,
        mut warranty: IssuedWarranty,
    ) -> Result<(Claim, IssuedWarranty), PortError> {
        debug!("Committing claim decision");
        let mut inner = self.store.inner.write().await;

        let stored_claim = inner
            .claims
            .get(&claim.id())
            .ok_or_else(|| PortError::not_found("Claim", claim.id()))?;
        check_version(stored_claim.version(), claim.version(), "claim")?;

        let stored_warranty = inner
            .warranties
            .get(&warranty.id())
            .ok_or_else(|| PortError::not_found("IssuedWarranty", warranty.id()))?;
        check_version(stored_warranty.version(), warranty.version(), "warranty")?;

        claim.bump_version();
        warranty.bump_version();
        inner.claims.insert(claim.id(), claim.clone());
        inner.warranties.insert(warranty.id(), warranty.clone());
        Ok((claim, warranty))
    }
}
