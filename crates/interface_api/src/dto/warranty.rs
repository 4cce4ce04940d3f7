//! Warranty and inspection DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Money;
use domain_pricing::{Grade, PricingError};
use domain_warranty::{
    ConditionReport, CoverageClaimStatus, CoverageStanding, InspectionReport, IssuedWarranty,
    NewInspection, PurchaseIntent,
};

/// Request body for submitting an inspection report
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitInspectionRequest {
    #[validate(length(equal = 15, message = "IMEI must be exactly 15 digits"))]
    pub imei: String,
    #[validate(length(min = 1, max = 100))]
    pub make: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    pub device_price: Decimal,
    pub grade: Option<String>,
    pub condition: ConditionReport,
}

impl SubmitInspectionRequest {
    pub fn into_input(self) -> Result<NewInspection, PricingError> {
        let grade = self
            .grade
            .as_deref()
            .map(|g| g.parse::<Grade>())
            .transpose()?;
        Ok(NewInspection {
            imei: self.imei,
            make: self.make,
            model: self.model,
            price: Money::inr(self.device_price),
            grade,
            condition: self.condition,
        })
    }
}

/// Request body for starting a warranty purchase
#[derive(Debug, Deserialize)]
pub struct StartPurchaseRequest {
    pub plan_id: Uuid,
    pub customer_id: Uuid,
}

/// Request body for confirming a purchase after payment
#[derive(Debug, Deserialize)]
pub struct ConfirmPurchaseRequest {
    pub order_id: String,
    pub payment_id: String,
}

/// Request body for issuing a fine against an inspection
#[derive(Debug, Deserialize, Validate)]
pub struct IssueFineRequest {
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
    pub amount: Option<Decimal>,
}

/// Inspection report as exposed over the API
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub id: Uuid,
    pub imei: String,
    pub make: String,
    pub model: String,
    pub device_price: Decimal,
    pub currency: String,
    pub grade: Option<String>,
    pub condition: ConditionReport,
    pub checked_by: Uuid,
    pub status: String,
    pub effective_status: String,
    pub fine_status: String,
    pub warranty_id: Option<Uuid>,
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportResponse {
    pub fn from_report(report: &InspectionReport) -> Self {
        let status = report.status().name().to_string();
        Self {
            id: *report.id().as_uuid(),
            imei: report.imei().as_str().to_string(),
            make: report.device().make.clone(),
            model: report.device().model.clone(),
            device_price: report.device().price.amount(),
            currency: report.device().price.currency().code().to_string(),
            grade: report.grade().map(|g| g.to_string()),
            condition: report.condition().clone(),
            checked_by: *report.checked_by().as_uuid(),
            status: status.clone(),
            effective_status: status,
            fine_status: report.fine_status().name().to_string(),
            warranty_id: report.warranty_id().map(|id| *id.as_uuid()),
            version: report.version(),
            created_at: report.created_at(),
            updated_at: report.updated_at(),
        }
    }

    /// Builds a response that reflects coverage expiry in the effective status.
    ///
    /// The stored status stays `purchased` or `activated` forever; callers
    /// see `expired` once the coverage period has lapsed.
    pub fn with_coverage(
        report: &InspectionReport,
        warranty: &IssuedWarranty,
        now: DateTime<Utc>,
    ) -> Self {
        let mut response = Self::from_report(report);
        if warranty.is_expired_at(now) {
            response.effective_status = "expired".to_string();
        }
        response
    }
}

/// Issued warranty as exposed over the API
#[derive(Debug, Serialize)]
pub struct WarrantyResponse {
    pub id: Uuid,
    pub report_id: Uuid,
    pub imei: String,
    pub customer_id: Uuid,
    pub plan_id: Uuid,
    pub plan_sku: String,
    pub grade: String,
    pub term_months: u32,
    pub price: Decimal,
    pub currency: String,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub standing: CoverageStanding,
    pub days_remaining: i64,
    pub claim_status: String,
    pub claim_id: Option<Uuid>,
    pub version: u32,
    pub issued_at: DateTime<Utc>,
}

impl WarrantyResponse {
    pub fn from_warranty(warranty: &IssuedWarranty, now: DateTime<Utc>) -> Self {
        let claim_id = match warranty.claim_status() {
            CoverageClaimStatus::NoClaim => None,
            CoverageClaimStatus::InProgress { claim_id }
            | CoverageClaimStatus::Settled { claim_id, .. } => Some(*claim_id.as_uuid()),
        };
        Self {
            id: *warranty.id().as_uuid(),
            report_id: *warranty.report_id().as_uuid(),
            imei: warranty.imei().as_str().to_string(),
            customer_id: *warranty.customer_id().as_uuid(),
            plan_id: *warranty.plan_id().as_uuid(),
            plan_sku: warranty.plan_sku().to_string(),
            grade: warranty.grade().to_string(),
            term_months: warranty.term().months(),
            price: warranty.price().amount(),
            currency: warranty.price().currency().code().to_string(),
            starts_at: warranty.period().starts_at(),
            expires_at: warranty.period().expires_at(),
            standing: warranty.standing(now),
            days_remaining: warranty.period().days_remaining(now),
            claim_status: warranty.claim_status().name().to_string(),
            claim_id,
            version: warranty.version(),
            issued_at: warranty.issued_at(),
        }
    }
}

/// Pending purchase order details returned when a purchase is started
#[derive(Debug, Serialize)]
pub struct PurchaseIntentResponse {
    pub report_id: Uuid,
    pub plan_id: Uuid,
    pub order_id: String,
    pub amount: Decimal,
    pub currency: String,
}

impl From<PurchaseIntent> for PurchaseIntentResponse {
    fn from(intent: PurchaseIntent) -> Self {
        Self {
            report_id: *intent.report_id.as_uuid(),
            plan_id: *intent.plan_id.as_uuid(),
            order_id: intent.order_id,
            amount: intent.amount.amount(),
            currency: intent.amount.currency().code().to_string(),
        }
    }
}
