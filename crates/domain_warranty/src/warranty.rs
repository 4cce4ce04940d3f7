//! Issued warranty
//!
//! An IssuedWarranty is created only by a confirmed purchase and is immutable
//! afterwards, except for its claim status. Whether coverage is still in force
//! is always derived from the coverage period at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, CoveragePeriod, CustomerId, Money, PlanId, ReportId, WarrantyId};
use domain_pricing::{Grade, PlanTerm, WarrantyPlan};

use crate::error::WarrantyError;
use crate::imei::Imei;

/// Gateway order and payment identifiers for a completed purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReference {
    /// Order created when the purchase was started
    pub order_id: String,
    /// Payment captured against the order
    pub payment_id: String,
}

impl PaymentReference {
    /// Creates a new payment reference
    pub fn new(order_id: impl Into<String>, payment_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            payment_id: payment_id.into(),
        }
    }
}

/// Claim standing recorded on a warranty
///
/// At most one claim is open against a warranty at any time. A settled
/// claim consumes the coverage; a rejected claim clears back to NoClaim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CoverageClaimStatus {
    /// No claim recorded
    NoClaim,

    /// A claim is open and being worked
    InProgress {
        /// The open claim
        claim_id: ClaimId,
    },

    /// A claim was approved and settled
    Settled {
        /// The settled claim
        claim_id: ClaimId,
        /// When the claim was settled
        settled_at: DateTime<Utc>,
    },
}

impl CoverageClaimStatus {
    /// Returns the wire name of the claim status
    pub fn name(&self) -> &'static str {
        match self {
            CoverageClaimStatus::NoClaim => "no-claim",
            CoverageClaimStatus::InProgress { .. } => "in-progress",
            CoverageClaimStatus::Settled { .. } => "settled",
        }
    }
}

/// Whether coverage is in force at a point in time, derived on read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageStanding {
    /// Coverage is in force
    Active,
    /// The coverage period has ended
    Expired,
}

/// A warranty issued against an inspection report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedWarranty {
    /// Unique warranty identifier
    id: WarrantyId,
    /// Report the warranty was purchased for
    report_id: ReportId,
    /// Covered device IMEI
    imei: Imei,
    /// Warranty holder
    customer_id: CustomerId,
    /// Purchased plan
    plan_id: PlanId,
    /// Purchased plan SKU
    plan_sku: String,
    /// Device grade at purchase time
    grade: Grade,
    /// Coverage term
    term: PlanTerm,
    /// Price paid
    price: Money,
    /// Gateway payment reference
    payment: PaymentReference,
    /// Coverage window
    period: CoveragePeriod,
    /// Claim standing
    claim_status: CoverageClaimStatus,
    /// Version for optimistic concurrency
    version: u32,
    /// When the warranty was issued
    issued_at: DateTime<Utc>,
}

impl IssuedWarranty {
    /// Issues a warranty for a confirmed purchase
    ///
    /// # Arguments
    ///
    /// * `report_id` - The inspection report the warranty covers
    /// * `imei` - The covered device IMEI
    /// * `customer_id` - The warranty holder
    /// * `plan` - The purchased plan
    /// * `price` - The amount actually paid
    /// * `payment` - The captured payment reference
    /// * `period` - The coverage window
    pub fn issue(
        report_id: ReportId,
        imei: Imei,
        customer_id: CustomerId,
        plan: &WarrantyPlan,
        price: Money,
        payment: PaymentReference,
        period: CoveragePeriod,
    ) -> Self {
        Self {
            id: WarrantyId::new_v7(),
            report_id,
            imei,
            customer_id,
            plan_id: plan.id,
            plan_sku: plan.sku.clone(),
            grade: plan.grade,
            term: plan.term,
            price,
            payment,
            period,
            claim_status: CoverageClaimStatus::NoClaim,
            version: 1,
            issued_at: Utc::now(),
        }
    }

    /// Returns the warranty ID
    pub fn id(&self) -> WarrantyId {
        self.id
    }

    /// Returns the covered report ID
    pub fn report_id(&self) -> ReportId {
        self.report_id
    }

    /// Returns the covered device IMEI
    pub fn imei(&self) -> &Imei {
        &self.imei
    }

    /// Returns the warranty holder
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the purchased plan ID
    pub fn plan_id(&self) -> PlanId {
        self.plan_id
    }

    /// Returns the purchased plan SKU
    pub fn plan_sku(&self) -> &str {
        &self.plan_sku
    }

    /// Returns the device grade at purchase time
    pub fn grade(&self) -> Grade {
        self.grade
    }

    /// Returns the coverage term
    pub fn term(&self) -> PlanTerm {
        self.term
    }

    /// Returns the price paid
    pub fn price(&self) -> Money {
        self.price
    }

    /// Returns the payment reference
    pub fn payment(&self) -> &PaymentReference {
        &self.payment
    }

    /// Returns the coverage window
    pub fn period(&self) -> &CoveragePeriod {
        &self.period
    }

    /// Returns the claim standing
    pub fn claim_status(&self) -> &CoverageClaimStatus {
        &self.claim_status
    }

    /// Returns the optimistic-concurrency version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns when the warranty was issued
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Advances the version; stores call this when persisting an update
    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    /// Returns when coverage ends
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.period.expires_at()
    }

    /// Checks whether coverage has ended at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.period.is_expired_at(now)
    }

    /// Derives the coverage standing at the given instant
    pub fn standing(&self, now: DateTime<Utc>) -> CoverageStanding {
        if self.is_expired_at(now) {
            CoverageStanding::Expired
        } else {
            CoverageStanding::Active
        }
    }

    /// Records an open claim against the warranty
    ///
    /// # Errors
    ///
    /// Returns error if a claim is already open or settled
    pub fn open_claim(&mut self, claim_id: ClaimId) -> Result<(), WarrantyError> {
        match &self.claim_status {
            CoverageClaimStatus::NoClaim => {
                self.claim_status = CoverageClaimStatus::InProgress { claim_id };
                Ok(())
            }
            _ => Err(WarrantyError::ClaimAlreadyOpen),
        }
    }

    /// Marks the open claim as settled
    ///
    /// # Errors
    ///
    /// Returns error unless a claim is in progress
    pub fn settle_claim(&mut self) -> Result<(), WarrantyError> {
        match &self.claim_status {
            CoverageClaimStatus::InProgress { claim_id } => {
                self.claim_status = CoverageClaimStatus::Settled {
                    claim_id: *claim_id,
                    settled_at: Utc::now(),
                };
                Ok(())
            }
            other => Err(WarrantyError::InvalidStatusTransition {
                from: other.name().to_string(),
                to: "settled".to_string(),
            }),
        }
    }

    /// Clears the open claim, making the coverage claimable again
    ///
    /// # Errors
    ///
    /// Returns error unless a claim is in progress
    pub fn clear_claim(&mut self) -> Result<(), WarrantyError> {
        match &self.claim_status {
            CoverageClaimStatus::InProgress { .. } => {
                self.claim_status = CoverageClaimStatus::NoClaim;
                Ok(())
            }
            other => Err(WarrantyError::InvalidStatusTransition {
                from: other.name().to_string(),
                to: "no-claim".to_string(),
            }),
        }
    }
}
