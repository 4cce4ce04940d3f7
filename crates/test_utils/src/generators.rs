//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{
    ClaimId, CoveragePeriod, Currency, CustomerId, Money, ReportId, Timezone, UserId,
};
use domain_pricing::{Grade, PlanTerm};
use domain_warranty::{ConditionReport, Imei, SurfaceCondition};
use proptest::prelude::*;

/// Strategy for generating device prices in paise
pub fn device_price_paise_strategy() -> impl Strategy<Value = i64> {
    100_00i64..2_000_000_00i64
}

/// Strategy for generating device market prices as INR Money
pub fn device_price_strategy() -> impl Strategy<Value = Money> {
    device_price_paise_strategy().prop_map(|paise| Money::from_minor(paise, Currency::INR))
}

/// Strategy for generating valid condition grades
pub fn grade_strategy() -> impl Strategy<Value = Grade> {
    prop_oneof![Just(Grade::A), Just(Grade::B), Just(Grade::C)]
}

/// Strategy for generating valid plan terms
pub fn plan_term_strategy() -> impl Strategy<Value = PlanTerm> {
    prop_oneof![
        Just(PlanTerm::SixMonths),
        Just(PlanTerm::TwelveMonths),
        Just(PlanTerm::TwentyFourMonths),
    ]
}

/// Strategy for generating valid IMEIs
pub fn imei_strategy() -> impl Strategy<Value = Imei> {
    "[0-9]{15}".prop_map(|digits| Imei::parse(&digits).expect("generated digits form an IMEI"))
}

/// Strategy for generating surface conditions
pub fn surface_condition_strategy() -> impl Strategy<Value = SurfaceCondition> {
    prop_oneof![
        Just(SurfaceCondition::Flawless),
        Just(SurfaceCondition::Scratched),
        Just(SurfaceCondition::Cracked),
    ]
}

/// Strategy for generating battery health percentages
pub fn battery_health_strategy() -> impl Strategy<Value = u8> {
    0u8..=100u8
}

/// Strategy for generating full condition reports
pub fn condition_report_strategy() -> impl Strategy<Value = ConditionReport> {
    (
        surface_condition_strategy(),
        surface_condition_strategy(),
        battery_health_strategy(),
        any::<bool>(),
    )
        .prop_map(
            |(screen, body, battery_health_percent, all_functions_ok)| ConditionReport {
                screen,
                body,
                battery_health_percent,
                all_functions_ok,
                notes: None,
            },
        )
}

/// Strategy for generating timestamps within 2024
pub fn timestamp_2024_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..365i64).prop_map(|days| {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(days)
    })
}

/// Strategy for generating coverage periods starting in 2024
pub fn coverage_period_strategy() -> impl Strategy<Value = CoveragePeriod> {
    (timestamp_2024_strategy(), plan_term_strategy()).prop_map(|(starts_at, term)| {
        CoveragePeriod::starting(starts_at, term.months(), &Timezone::default())
            .expect("Generated invalid period")
    })
}

/// Strategy for generating ReportId
pub fn report_id_strategy() -> impl Strategy<Value = ReportId> {
    any::<[u8; 16]>().prop_map(|bytes| ReportId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating ClaimId
pub fn claim_id_strategy() -> impl Strategy<Value = ClaimId> {
    any::<[u8; 16]>().prop_map(|bytes| ClaimId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating CustomerId
pub fn customer_id_strategy() -> impl Strategy<Value = CustomerId> {
    any::<[u8; 16]>().prop_map(|bytes| CustomerId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating UserId
pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
    any::<[u8; 16]>().prop_map(|bytes| UserId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}
