//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{ActivityAction, ActivityRecord, CoveragePeriod, Money, PortError};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Arguments
///
/// * `actual` - The actual Money value
/// * `expected` - The expected Money value
/// * `tolerance` - The allowed difference in the amount
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a coverage period contains a specific timestamp
pub fn assert_period_contains<T: chrono::TimeZone>(
    period: &CoveragePeriod,
    timestamp: chrono::DateTime<T>,
) where
    T::Offset: std::fmt::Display,
{
    let utc_timestamp = timestamp.with_timezone(&chrono::Utc);
    assert!(
        period.contains(utc_timestamp),
        "Period {:?} does not contain timestamp {}",
        period,
        utc_timestamp
    );
}

/// Asserts that a coverage period does not contain a specific timestamp
pub fn assert_period_excludes<T: chrono::TimeZone>(
    period: &CoveragePeriod,
    timestamp: chrono::DateTime<T>,
) where
    T::Offset: std::fmt::Display,
{
    let utc_timestamp = timestamp.with_timezone(&chrono::Utc);
    assert!(
        !period.contains(utc_timestamp),
        "Period {:?} unexpectedly contains timestamp {}",
        period,
        utc_timestamp
    );
}

/// Asserts that a port error is in the not-found class
pub fn assert_not_found(error: &PortError) {
    assert!(
        error.is_not_found(),
        "Expected a not-found error, got: {:?}",
        error
    );
}

/// Asserts that a port error is in the conflict class
pub fn assert_conflict(error: &PortError) {
    assert!(
        error.is_conflict(),
        "Expected a conflict error, got: {:?}",
        error
    );
}

/// Asserts that a port error is transient and worth retrying
pub fn assert_transient(error: &PortError) {
    assert!(
        error.is_transient(),
        "Expected a transient error, got: {:?}",
        error
    );
}

/// Asserts that an activity trail contains a record with the given action
pub fn assert_action_recorded(records: &[ActivityRecord], action: ActivityAction) {
    assert!(
        records.iter().any(|record| record.action == action),
        "No activity record with action {:?} in a trail of {} records",
        action,
        records.len()
    );
}

/// Asserts that an activity trail matches an exact action sequence
pub fn assert_actions_in_order(records: &[ActivityRecord], expected: &[ActivityAction]) {
    let actions: Vec<ActivityAction> = records.iter().map(|record| record.action).collect();
    assert_eq!(
        actions, expected,
        "Activity trail does not match the expected action sequence"
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err matching {}, got Ok({:?})",
                stringify!($pattern),
                value
            ),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
