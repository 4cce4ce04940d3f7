//! Price bands and tier schedules
//!
//! A tier schedule partitions the device price line for one grade. Bands are
//! inclusive on both ends; the highest band may drop its upper bound to cover
//! every price above it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::Money;

use crate::error::PricingError;
use crate::grade::Grade;
use crate::plan::PlanTerm;

/// An inclusive device-price band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    lower: Decimal,
    upper: Option<Decimal>,
}

impl PriceBand {
    /// Creates a band with both bounds
    pub fn bounded(lower: Decimal, upper: Decimal) -> Result<Self, PricingError> {
        if upper < lower {
            return Err(PricingError::InvalidBand { lower, upper });
        }
        Ok(Self {
            lower,
            upper: Some(upper),
        })
    }

    /// Creates the open-ended top band
    pub fn open_ended(lower: Decimal) -> Self {
        Self { lower, upper: None }
    }

    pub fn lower(&self) -> Decimal {
        self.lower
    }

    pub fn upper(&self) -> Option<Decimal> {
        self.upper
    }

    pub fn is_open_ended(&self) -> bool {
        self.upper.is_none()
    }

    /// Returns true if the price falls inside the band, bounds inclusive
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.lower && self.upper.map_or(true, |u| price <= u)
    }

    /// Label in the catalog's listing form: "20000-24999" or "100000+"
    pub fn label(&self) -> String {
        match self.upper {
            Some(upper) => format!("{}-{}", self.lower, upper),
            None => format!("{}+", self.lower),
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Price for one plan term inside a tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRate {
    pub term: PlanTerm,
    pub price: Money,
}

impl PlanRate {
    pub fn new(term: PlanTerm, price: Money) -> Self {
        Self { term, price }
    }

    /// Display cost per day: price over a 365-day year, rounded to the
    /// currency's two decimal places
    pub fn daily_price(&self) -> Money {
        (self.price / dec!(365)).round_to_currency()
    }
}

/// One band of a grade's schedule together with its term rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    grade: Grade,
    band: PriceBand,
    rates: Vec<PlanRate>,
}

impl PricingTier {
    pub fn new(grade: Grade, band: PriceBand, rates: Vec<PlanRate>) -> Self {
        Self { grade, band, rates }
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn band(&self) -> &PriceBand {
        &self.band
    }

    pub fn rates(&self) -> &[PlanRate] {
        &self.rates
    }

    pub fn rate_for(&self, term: PlanTerm) -> Result<&PlanRate, PricingError> {
        self.rates
            .iter()
            .find(|r| r.term == term)
            .ok_or(PricingError::UnknownTerm(term.months()))
    }

    pub fn contains(&self, price: Decimal) -> bool {
        self.band.contains(price)
    }

    pub fn label(&self) -> String {
        self.band.label()
    }
}

/// The full ascending tier schedule for one grade
///
/// Construction validates the partition invariant: the schedule is non-empty,
/// starts at zero, ascends with each band's lower bound exactly one rupee
/// above the previous upper bound, and only the last band may be open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSchedule {
    grade: Grade,
    tiers: Vec<PricingTier>,
}

impl TierSchedule {
    pub fn new(grade: Grade, tiers: Vec<PricingTier>) -> Result<Self, PricingError> {
        let first = tiers.first().ok_or(PricingError::EmptySchedule)?;
        if !first.band().lower().is_zero() {
            return Err(PricingError::UnanchoredSchedule(first.band().lower()));
        }

        for pair in tiers.windows(2) {
            let upper = pair[0]
                .band()
                .upper()
                .ok_or(PricingError::UnboundedBandNotLast)?;
            let expected = upper + Decimal::ONE;
            let found = pair[1].band().lower();
            if found > expected {
                return Err(PricingError::BandGap { expected, found });
            }
            if found < expected {
                return Err(PricingError::BandOverlap { expected, found });
            }
        }

        Ok(Self { grade, tiers })
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }

    /// Resolves the tier for a non-negative device price
    ///
    /// Returns the single tier whose band contains the price. A price above
    /// every bounded band quotes from the highest tier instead of failing;
    /// the platform never refuses to quote.
    pub fn resolve(&self, price: Decimal) -> Result<&PricingTier, PricingError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(PricingError::InvalidDevicePrice(format!(
                "device price must not be negative, got {}",
                price
            )));
        }

        if let Some(tier) = self.tiers.iter().find(|t| t.contains(price)) {
            return Ok(tier);
        }

        // Above every bounded band: fall back to the top tier.
        self.tiers.last().ok_or(PricingError::EmptySchedule)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn schedule() -> TierSchedule {
        let tier = |lower: i64, upper: Option<i64>, annual: i64| {
            let band = match upper {
                Some(upper) => {
                    PriceBand::bounded(Decimal::from(lower), Decimal::from(upper)).unwrap()
                }
                None => PriceBand::open_ended(Decimal::from(lower)),
            };
            PricingTier::new(
                Grade::A,
                band,
                vec![PlanRate::new(
                    PlanTerm::TwelveMonths,
                    Money::inr(Decimal::from(annual)),
                )],
            )
        };
        TierSchedule::new(
            Grade::A,
            vec![
                tier(0, Some(9_999), 499),
                tier(10_000, Some(24_999), 899),
                tier(25_000, None, 1_299),
            ],
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn every_non_negative_price_resolves(price in 0i64..10_000_000i64) {
            let schedule = schedule();
            let tier = schedule.resolve(Decimal::from(price)).unwrap();
            // Either the band contains the price, or the price is above every
            // bounded band and the open-ended top tier answered.
            prop_assert!(tier.contains(Decimal::from(price)) || tier.band().is_open_ended());
        }

        #[test]
        fn at_most_one_band_contains_a_price(price in 0i64..10_000_000i64) {
            let schedule = schedule();
            let hits = schedule
                .tiers()
                .iter()
                .filter(|t| t.contains(Decimal::from(price)))
                .count();
            prop_assert!(hits <= 1);
        }
    }
}
