//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the warranty
//! platform. These fixtures are designed to be consistent and predictable
//! for unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{
    Actor, ClaimId, CoveragePeriod, Currency, CustomerId, Money, ReportId, Timezone, UserId,
    WarrantyId,
};
use domain_pricing::{PlanBook, WarrantyPlan};
use domain_warranty::{ConditionReport, Imei, SurfaceCondition};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Market price of the standard test device (falls in band 20000-24999)
    pub fn inr_device_price() -> Money {
        Money::inr(dec!(22500.00))
    }

    /// Grade-A twelve-month plan price for the standard test device
    pub fn inr_plan_price() -> Money {
        Money::inr(dec!(899.00))
    }

    /// A price above every bounded band, for open-ended tier tests
    pub fn inr_flagship_price() -> Money {
        Money::inr(dec!(134900.00))
    }

    /// A budget device price in the lowest band
    pub fn inr_budget_price() -> Money {
        Money::inr(dec!(7999.00))
    }

    /// Standard fine amount for a misreported condition
    pub fn inr_fine() -> Money {
        Money::inr(dec!(500.00))
    }

    /// Zero rupees
    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard inspection timestamp (Jun 1, 2024)
    pub fn inspection_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap()
    }

    /// Standard coverage start (Jan 1, 2024)
    pub fn coverage_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Mid-coverage timestamp for containment tests
    pub fn mid_coverage() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    /// Timestamp after a one-year coverage starting Jan 1, 2024 has lapsed
    pub fn after_coverage() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    /// Issue instant far enough in the past that a twelve-month warranty
    /// has already expired
    pub fn issued_long_ago() -> DateTime<Utc> {
        Utc::now() - Duration::days(400)
    }

    /// A twelve-month coverage period starting at [`Self::coverage_start`]
    pub fn one_year_coverage() -> CoveragePeriod {
        CoveragePeriod::starting(Self::coverage_start(), 12, &Timezone::default()).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic report ID for testing
    pub fn report_id() -> ReportId {
        ReportId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic warranty ID for testing
    pub fn warranty_id() -> WarrantyId {
        WarrantyId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic claim ID for testing
    pub fn claim_id() -> ClaimId {
        ClaimId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates a deterministic customer ID for testing
    pub fn customer_id() -> CustomerId {
        CustomerId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
    }

    /// Creates a deterministic user ID for the phone checker
    pub fn checker_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440005").unwrap())
    }

    /// Creates a deterministic user ID for the shop owner
    pub fn owner_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440006").unwrap())
    }

    /// Creates a deterministic user ID for the admin
    pub fn admin_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440007").unwrap())
    }
}

/// Fixture for actor contexts, one per platform role
pub struct ActorFixtures;

impl ActorFixtures {
    /// The phone checker who files inspection reports
    pub fn phone_checker() -> Actor {
        Actor::phone_checker(IdFixtures::checker_id())
    }

    /// The shop owner who purchases warranties and files claims
    pub fn shop_owner() -> Actor {
        Actor::shop_owner(IdFixtures::owner_id())
    }

    /// The admin who activates warranties and decides claims
    pub fn admin() -> Actor {
        Actor::admin(IdFixtures::admin_id())
    }
}

/// Fixture for device and reference-string test data
pub struct DeviceFixtures;

impl DeviceFixtures {
    /// Standard test IMEI
    pub fn imei() -> Imei {
        Imei::parse("356938035643809").unwrap()
    }

    /// A second distinct IMEI for uniqueness tests
    pub fn other_imei() -> Imei {
        Imei::parse("490154203237518").unwrap()
    }

    /// Standard device make
    pub fn make() -> &'static str {
        "Samsung"
    }

    /// Standard device model
    pub fn model() -> &'static str {
        "Galaxy S21"
    }

    /// Standard order reference
    pub fn order_id() -> &'static str {
        "ORD-202406-000001"
    }

    /// Standard payment reference from the gateway callback
    pub fn payment_id() -> &'static str {
        "PAY-TEST-0001"
    }

    /// Standard claim issue description
    pub fn claim_issue() -> &'static str {
        "Touchscreen stops responding along the left edge"
    }
}

/// Fixture for inspection condition findings
pub struct ConditionFixtures;

impl ConditionFixtures {
    /// A device in very good shape, passes every functional check
    pub fn clean() -> ConditionReport {
        ConditionReport {
            screen: SurfaceCondition::Flawless,
            body: SurfaceCondition::Scratched,
            battery_health_percent: 92,
            all_functions_ok: true,
            notes: None,
        }
    }

    /// A worn device that still passes functional checks
    pub fn worn() -> ConditionReport {
        ConditionReport {
            screen: SurfaceCondition::Scratched,
            body: SurfaceCondition::Scratched,
            battery_health_percent: 78,
            all_functions_ok: true,
            notes: Some("Deep scratches on the rear glass".to_string()),
        }
    }

    /// A damaged device that fails functional checks
    pub fn damaged() -> ConditionReport {
        ConditionReport {
            screen: SurfaceCondition::Cracked,
            body: SurfaceCondition::Cracked,
            battery_health_percent: 54,
            all_functions_ok: false,
            notes: Some("Crack across the top right corner, speaker rattles".to_string()),
        }
    }
}

static SHARED_PLANS: Lazy<Arc<PlanBook>> = Lazy::new(|| Arc::new(PlanBook::standard()));

/// Fixture for warranty plan test data
///
/// `PlanBook::standard` mints fresh plan ids on every call, so a test that
/// wires a service with one book and then looks plans up in another would
/// never see matching ids. The fixtures here all draw from a single
/// process-wide instance.
pub struct PlanFixtures;

impl PlanFixtures {
    /// The process-wide shared plan book
    pub fn plan_book() -> Arc<PlanBook> {
        SHARED_PLANS.clone()
    }

    /// SKU of the standard test plan (band 20000-24999, grade A, 12 months)
    pub fn standard_sku() -> &'static str {
        "DG-B04-A-12M"
    }

    /// The standard test plan, drawn from the shared book
    pub fn standard_plan() -> WarrantyPlan {
        SHARED_PLANS
            .find_sku(Self::standard_sku())
            .expect("standard plan book carries DG-B04-A-12M")
            .clone()
    }
}
