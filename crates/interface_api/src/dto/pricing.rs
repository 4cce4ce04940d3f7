//! Pricing DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_pricing::{PlanQuote, WarrantyPlan};

/// Query parameters for the plan listing
#[derive(Debug, Deserialize)]
pub struct PlanListParams {
    pub grade: Option<String>,
}

/// Query parameters for a price quote
#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub device_price: Decimal,
    pub grade: Option<String>,
    pub term_months: Option<u32>,
}

/// A single warranty plan as exposed over the API
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub id: Uuid,
    pub sku: String,
    pub grade: String,
    pub term_months: u32,
    pub band_lower: Decimal,
    pub band_upper: Option<Decimal>,
    pub price: Decimal,
    pub daily_price: Decimal,
    pub currency: String,
}

impl From<&WarrantyPlan> for PlanResponse {
    fn from(plan: &WarrantyPlan) -> Self {
        Self {
            id: *plan.id.as_uuid(),
            sku: plan.sku.clone(),
            grade: plan.grade.to_string(),
            term_months: plan.warranty_months(),
            band_lower: plan.band.lower(),
            band_upper: plan.band.upper(),
            price: plan.price.amount(),
            daily_price: plan.daily_price().amount(),
            currency: plan.price.currency().code().to_string(),
        }
    }
}

/// A resolved quote for a device price
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub tier: String,
    pub grade: String,
    pub term_months: u32,
    pub price: Decimal,
    pub daily_price: Decimal,
    pub currency: String,
}

impl From<PlanQuote> for QuoteResponse {
    fn from(quote: PlanQuote) -> Self {
        Self {
            tier: quote.tier_label,
            grade: quote.grade.to_string(),
            term_months: quote.term.months(),
            price: quote.price.amount(),
            daily_price: quote.daily_price.amount(),
            currency: quote.price.currency().code().to_string(),
        }
    }
}
