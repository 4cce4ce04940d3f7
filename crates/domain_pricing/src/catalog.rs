//! The pricing catalog: grade-indexed tier schedules
//!
//! The standard catalog is the platform's hardcoded rate table. Grade A
//! carries the base prices; B and C apply loadings, and the six- and
//! twenty-four-month terms scale from the twelve-month base. Every derived
//! price is rounded to whole rupees with banker's rounding.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{Currency, Money, Rate};

use crate::error::PricingError;
use crate::grade::Grade;
use crate::plan::{PlanQuote, PlanTerm};
use crate::tier::{PlanRate, PriceBand, PricingTier, TierSchedule};

/// Grade-indexed pricing schedules in a single currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingCatalog {
    currency: Currency,
    schedules: BTreeMap<Grade, TierSchedule>,
}

impl PricingCatalog {
    pub fn new(
        currency: Currency,
        schedules: Vec<TierSchedule>,
    ) -> Result<Self, PricingError> {
        if schedules.is_empty() {
            return Err(PricingError::EmptySchedule);
        }
        let schedules = schedules
            .into_iter()
            .map(|s| (s.grade(), s))
            .collect();
        Ok(Self {
            currency,
            schedules,
        })
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn schedules(&self) -> impl Iterator<Item = &TierSchedule> {
        self.schedules.values()
    }

    pub fn schedule_for(&self, grade: Grade) -> Result<&TierSchedule, PricingError> {
        self.schedules
            .get(&grade)
            .ok_or_else(|| PricingError::UnknownGrade(grade.to_string()))
    }

    /// Resolves the pricing tier for a device price
    ///
    /// The grade defaults to A when absent. The price must be non-negative
    /// and in the catalog currency; any such price resolves to exactly one
    /// tier.
    pub fn resolve(
        &self,
        device_price: &Money,
        grade: Option<Grade>,
    ) -> Result<&PricingTier, PricingError> {
        if device_price.currency() != self.currency {
            return Err(PricingError::CurrencyMismatch {
                expected: self.currency.to_string(),
                got: device_price.currency().to_string(),
            });
        }
        self.schedule_for(grade.unwrap_or_default())?
            .resolve(device_price.amount())
    }

    /// Quotes a plan price for a device at a grade and term
    pub fn quote(
        &self,
        device_price: &Money,
        grade: Option<Grade>,
        term: PlanTerm,
    ) -> Result<PlanQuote, PricingError> {
        let grade = grade.unwrap_or_default();
        let tier = self.resolve(device_price, Some(grade))?;
        let rate = tier.rate_for(term)?;
        Ok(PlanQuote {
            tier_label: tier.label(),
            grade,
            term,
            price: rate.price,
            daily_price: rate.daily_price(),
        })
    }

    /// The platform's standard hardcoded catalog
    pub fn standard() -> &'static PricingCatalog {
        &STANDARD_CATALOG
    }
}

/// Bands with their grade-A twelve-month base price, in rupees
const BAND_TABLE: [(i64, Option<i64>, i64); 10] = [
    (0, Some(9_999), 499),
    (10_000, Some(14_999), 649),
    (15_000, Some(19_999), 749),
    (20_000, Some(24_999), 899),
    (25_000, Some(29_999), 1_049),
    (30_000, Some(39_999), 1_249),
    (40_000, Some(49_999), 1_499),
    (50_000, Some(74_999), 1_899),
    (75_000, Some(99_999), 2_399),
    (100_000, None, 2_999),
];

fn grade_loading(grade: Grade) -> Rate {
    match grade {
        Grade::A => Rate::new(dec!(0)),
        Grade::B => Rate::from_percentage(dec!(20)),
        Grade::C => Rate::from_percentage(dec!(45)),
    }
}

fn term_factor(term: PlanTerm) -> Decimal {
    match term {
        PlanTerm::SixMonths => dec!(0.60),
        PlanTerm::TwelveMonths => dec!(1.00),
        PlanTerm::TwentyFourMonths => dec!(1.80),
    }
}

fn build_standard_catalog() -> Result<PricingCatalog, PricingError> {
    let mut schedules = Vec::with_capacity(Grade::all().len());
    for grade in Grade::all() {
        let loading = grade_loading(grade);
        let mut tiers = Vec::with_capacity(BAND_TABLE.len());
        for (lower, upper, base) in BAND_TABLE {
            let band = match upper {
                Some(upper) => PriceBand::bounded(Decimal::from(lower), Decimal::from(upper))?,
                None => PriceBand::open_ended(Decimal::from(lower)),
            };
            let annual = loading.load(&Money::inr(Decimal::from(base))).round_bankers(0);
            let rates = PlanTerm::all()
                .into_iter()
                .map(|term| PlanRate::new(term, annual.multiply(term_factor(term)).round_bankers(0)))
                .collect();
            tiers.push(PricingTier::new(grade, band, rates));
        }
        schedules.push(TierSchedule::new(grade, tiers)?);
    }
    PricingCatalog::new(Currency::INR, schedules)
}

static STANDARD_CATALOG: Lazy<PricingCatalog> =
    Lazy::new(|| build_standard_catalog().expect("standard catalog is a valid partition"));

#[cfg(test)]
mod tests {
    use super::*;

    fn inr(amount: i64) -> Money {
        Money::inr(Decimal::from(amount))
    }

    #[test]
    fn test_standard_catalog_has_all_grades() {
        let catalog = PricingCatalog::standard();
        for grade in Grade::all() {
            assert!(catalog.schedule_for(grade).is_ok());
        }
    }

    #[test]
    fn test_band_boundaries_share_a_tier() {
        let catalog = PricingCatalog::standard();
        let low = catalog.resolve(&inr(20_000), Some(Grade::A)).unwrap();
        let high = catalog.resolve(&inr(24_999), Some(Grade::A)).unwrap();
        assert_eq!(low.label(), "20000-24999");
        assert_eq!(low.label(), high.label());
    }

    #[test]
    fn test_price_above_every_band_uses_top_tier() {
        let catalog = PricingCatalog::standard();
        let tier = catalog.resolve(&inr(999_999), Some(Grade::A)).unwrap();
        assert_eq!(tier.label(), "100000+");
    }

    #[test]
    fn test_missing_grade_defaults_to_a() {
        let catalog = PricingCatalog::standard();
        let defaulted = catalog.quote(&inr(22_500), None, PlanTerm::TwelveMonths).unwrap();
        let explicit = catalog
            .quote(&inr(22_500), Some(Grade::A), PlanTerm::TwelveMonths)
            .unwrap();
        assert_eq!(defaulted, explicit);
        assert_eq!(defaulted.price, inr(899));
    }

    #[test]
    fn test_twelve_month_daily_price_anchor() {
        let catalog = PricingCatalog::standard();
        let quote = catalog
            .quote(&inr(24_999), Some(Grade::A), PlanTerm::TwelveMonths)
            .unwrap();
        assert_eq!(quote.price, inr(899));
        assert_eq!(quote.daily_price, Money::inr(dec!(2.46)));
    }

    #[test]
    fn test_grade_loadings_applied() {
        let catalog = PricingCatalog::standard();
        let b = catalog
            .quote(&inr(22_000), Some(Grade::B), PlanTerm::TwelveMonths)
            .unwrap();
        let c = catalog
            .quote(&inr(22_000), Some(Grade::C), PlanTerm::TwelveMonths)
            .unwrap();
        assert_eq!(b.price, inr(1_079));
        assert_eq!(c.price, inr(1_304));
    }

    #[test]
    fn test_foreign_currency_rejected() {
        let catalog = PricingCatalog::standard();
        let price = Money::new(dec!(300), Currency::USD);
        let result = catalog.resolve(&price, None);
        assert!(matches!(result, Err(PricingError::CurrencyMismatch { .. })));
    }
}
