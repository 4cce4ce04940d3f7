//! Warranty plans and the purchasable plan book

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Money, PlanId};

use crate::catalog::PricingCatalog;
use crate::error::PricingError;
use crate::grade::Grade;
use crate::tier::PriceBand;

/// Plan duration, carried on the wire as whole months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PlanTerm {
    SixMonths,
    TwelveMonths,
    TwentyFourMonths,
}

impl PlanTerm {
    pub fn all() -> [PlanTerm; 3] {
        [
            PlanTerm::SixMonths,
            PlanTerm::TwelveMonths,
            PlanTerm::TwentyFourMonths,
        ]
    }

    pub fn months(&self) -> u32 {
        match self {
            PlanTerm::SixMonths => 6,
            PlanTerm::TwelveMonths => 12,
            PlanTerm::TwentyFourMonths => 24,
        }
    }
}

impl TryFrom<u32> for PlanTerm {
    type Error = PricingError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        match months {
            6 => Ok(PlanTerm::SixMonths),
            12 => Ok(PlanTerm::TwelveMonths),
            24 => Ok(PlanTerm::TwentyFourMonths),
            other => Err(PricingError::UnknownTerm(other)),
        }
    }
}

impl From<PlanTerm> for u32 {
    fn from(term: PlanTerm) -> u32 {
        term.months()
    }
}

impl fmt::Display for PlanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.months())
    }
}

/// A purchasable warranty plan: one (band, grade, term) cell of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyPlan {
    pub id: PlanId,
    pub sku: String,
    pub grade: Grade,
    pub term: PlanTerm,
    pub band: PriceBand,
    pub price: Money,
}

impl WarrantyPlan {
    /// Coverage length this plan buys
    pub fn warranty_months(&self) -> u32 {
        self.term.months()
    }

    /// Display cost per day over a 365-day year
    pub fn daily_price(&self) -> Money {
        (self.price / dec!(365)).round_to_currency()
    }

    /// Returns true if the plan's band covers the device price
    pub fn covers_price(&self, device_price: Decimal) -> bool {
        self.band.contains(device_price)
    }
}

/// A price quote for a device at a grade and term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanQuote {
    pub tier_label: String,
    pub grade: Grade,
    pub term: PlanTerm,
    pub price: Money,
    pub daily_price: Money,
}

/// The purchasable plan book, materialized from a pricing catalog
///
/// Plan ids are assigned at materialization; the SKU encodes the band
/// position, grade, and term for operator-facing listings.
#[derive(Debug, Clone)]
pub struct PlanBook {
    plans: Vec<WarrantyPlan>,
}

impl PlanBook {
    pub fn from_catalog(catalog: &PricingCatalog) -> Self {
        let mut plans = Vec::new();
        for schedule in catalog.schedules() {
            for (position, tier) in schedule.tiers().iter().enumerate() {
                for rate in tier.rates() {
                    plans.push(WarrantyPlan {
                        id: PlanId::new_v7(),
                        sku: Self::sku(position, tier.grade(), rate.term),
                        grade: tier.grade(),
                        term: rate.term,
                        band: *tier.band(),
                        price: rate.price,
                    });
                }
            }
        }
        Self { plans }
    }

    /// The plan book for the standard catalog
    pub fn standard() -> Self {
        Self::from_catalog(PricingCatalog::standard())
    }

    fn sku(position: usize, grade: Grade, term: PlanTerm) -> String {
        format!("DG-B{:02}-{}-{}M", position + 1, grade, term.months())
    }

    pub fn get(&self, id: PlanId) -> Result<&WarrantyPlan, PricingError> {
        self.plans
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PricingError::PlanNotFound(id.to_string()))
    }

    pub fn find_sku(&self, sku: &str) -> Option<&WarrantyPlan> {
        self.plans.iter().find(|p| p.sku == sku)
    }

    pub fn plans_for(&self, grade: Grade) -> impl Iterator<Item = &WarrantyPlan> {
        self.plans.iter().filter(move |p| p.grade == grade)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WarrantyPlan> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_month_mapping() {
        assert_eq!(PlanTerm::SixMonths.months(), 6);
        assert_eq!(PlanTerm::TwelveMonths.months(), 12);
        assert_eq!(PlanTerm::TwentyFourMonths.months(), 24);
    }

    #[test]
    fn test_term_try_from_rejects_odd_months() {
        assert!(PlanTerm::try_from(12).is_ok());
        assert!(matches!(
            PlanTerm::try_from(7),
            Err(PricingError::UnknownTerm(7))
        ));
    }

    #[test]
    fn test_term_serde_as_months() {
        let json = serde_json::to_string(&PlanTerm::TwentyFourMonths).unwrap();
        assert_eq!(json, "24");
        let back: PlanTerm = serde_json::from_str("6").unwrap();
        assert_eq!(back, PlanTerm::SixMonths);
        assert!(serde_json::from_str::<PlanTerm>("9").is_err());
    }

    #[test]
    fn test_plan_book_lookup() {
        let book = PlanBook::standard();
        assert!(!book.is_empty());

        let first = book.iter().next().unwrap().clone();
        assert_eq!(book.get(first.id).unwrap().sku, first.sku);
        assert!(book.find_sku(&first.sku).is_some());
        assert!(book.get(PlanId::new()).is_err());
    }

    #[test]
    fn test_plan_book_sku_shape() {
        let book = PlanBook::standard();
        let plan = book.find_sku("DG-B04-A-12M").expect("standard sku present");
        assert_eq!(plan.grade, Grade::A);
        assert_eq!(plan.term, PlanTerm::TwelveMonths);
        assert_eq!(plan.price, Money::inr(dec!(899)));
    }
}
