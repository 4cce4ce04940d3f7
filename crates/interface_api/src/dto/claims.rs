//! Claim DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{CustomerId, ReportId};
use domain_claims::{Claim, ClaimQuery, ClaimStatus, NewClaim};

/// Request body for filing a claim
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitClaimRequest {
    pub report_id: Uuid,
    pub customer_id: Uuid,
    #[validate(length(min = 1, max = 1000))]
    pub issue_description: String,
}

impl SubmitClaimRequest {
    pub fn into_input(self) -> NewClaim {
        NewClaim {
            report_id: ReportId::from_uuid(self.report_id),
            customer_id: CustomerId::from_uuid(self.customer_id),
            issue_description: self.issue_description,
        }
    }
}

/// Request body for moving a claim through its lifecycle
#[derive(Debug, Deserialize, Validate)]
pub struct DecideClaimRequest {
    pub status: ClaimStatus,
    #[validate(length(max = 1000))]
    pub note: Option<String>,
}

/// Query parameters for the claim listing
#[derive(Debug, Default, Deserialize)]
pub struct ClaimListParams {
    pub customer_id: Option<Uuid>,
    pub report_id: Option<Uuid>,
    pub status: Option<ClaimStatus>,
}

impl ClaimListParams {
    pub fn into_query(self) -> ClaimQuery {
        ClaimQuery {
            customer_id: self.customer_id.map(CustomerId::from_uuid),
            report_id: self.report_id.map(ReportId::from_uuid),
            status: self.status,
        }
    }
}

/// Claim as exposed over the API
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub claim_number: String,
    pub report_id: Uuid,
    pub warranty_id: Uuid,
    pub imei: String,
    pub customer_id: Uuid,
    pub filed_by: Uuid,
    pub issue_description: String,
    pub status: ClaimStatus,
    pub decision_note: Option<String>,
    pub decided_by: Option<Uuid>,
    pub decided_at: Option<DateTime<Utc>>,
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Claim> for ClaimResponse {
    fn from(claim: &Claim) -> Self {
        Self {
            id: *claim.id().as_uuid(),
            claim_number: claim.claim_number().to_string(),
            report_id: *claim.report_id().as_uuid(),
            warranty_id: *claim.warranty_id().as_uuid(),
            imei: claim.imei().as_str().to_string(),
            customer_id: *claim.customer_id().as_uuid(),
            filed_by: *claim.filed_by().as_uuid(),
            issue_description: claim.issue_description().to_string(),
            status: claim.status(),
            decision_note: claim.decision_note().map(str::to_string),
            decided_by: claim.decided_by().map(|id| *id.as_uuid()),
            decided_at: claim.decided_at(),
            version: claim.version(),
            created_at: claim.created_at(),
            updated_at: claim.updated_at(),
        }
    }
}
