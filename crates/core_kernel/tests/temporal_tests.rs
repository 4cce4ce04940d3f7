//! Comprehensive unit tests for the Temporal module
//!
//! Tests cover CoveragePeriod construction, expiry derivation,
//! and Timezone functionality.

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::temporal::TemporalError;
use core_kernel::{CoveragePeriod, Timezone};

fn kolkata() -> Timezone {
    Timezone::new(chrono_tz::Asia::Kolkata)
}

mod coverage_period {
    use super::*;

    mod creation {
        use super::*;

        #[test]
        fn test_starting_fixes_expiry_at_construction() {
            let issued = Utc.with_ymd_and_hms(2024, 6, 1, 9, 15, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 12, &kolkata()).unwrap();

            assert_eq!(period.starts_at(), issued);
            assert_eq!(period.months(), 12);
            assert!(period.expires_at() > issued);
        }

        #[test]
        fn test_zero_months_rejected() {
            let issued = Utc::now();
            let result = CoveragePeriod::starting(issued, 0, &kolkata());
            assert_eq!(result, Err(TemporalError::EmptyCoverage));
        }

        #[test]
        fn test_six_month_term() {
            let issued = Utc.with_ymd_and_hms(2024, 1, 10, 4, 0, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 6, &kolkata()).unwrap();

            let local_expiry = kolkata().to_local(period.expires_at());
            assert_eq!(
                local_expiry.date_naive(),
                NaiveDate::from_ymd_opt(2024, 7, 10).unwrap()
            );
        }

        #[test]
        fn test_month_end_clamps_in_short_month() {
            // Issued Jan 31 IST; one month later lands on Feb 29 (leap year).
            let issued = Utc.with_ymd_and_hms(2024, 1, 31, 5, 0, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 1, &kolkata()).unwrap();

            let local_expiry = kolkata().to_local(period.expires_at());
            assert_eq!(
                local_expiry.date_naive(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
            );
        }

        #[test]
        fn test_late_night_utc_rolls_to_next_local_day() {
            // 20:00 UTC is already past midnight in Kolkata, so the local
            // start date (and hence expiry) is one day later.
            let issued = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 12, &kolkata()).unwrap();

            let local_expiry = kolkata().to_local(period.expires_at());
            assert_eq!(
                local_expiry.date_naive(),
                NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
            );
        }
    }

    mod expiry {
        use super::*;

        #[test]
        fn test_not_expired_within_window() {
            let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 12, &kolkata()).unwrap();

            let mid = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
            assert!(!period.is_expired_at(mid));
        }

        #[test]
        fn test_expired_after_end_of_expiry_day() {
            let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 12, &kolkata()).unwrap();

            let after = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
            assert!(period.is_expired_at(after));
        }

        #[test]
        fn test_expiry_boundary_is_end_of_local_day() {
            let issued = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 12, &kolkata()).unwrap();

            // End of 2025-03-15 IST falls at 18:29:59.999999999 UTC.
            let inside = Utc.with_ymd_and_hms(2025, 3, 15, 18, 29, 0).unwrap();
            let outside = Utc.with_ymd_and_hms(2025, 3, 15, 18, 30, 0).unwrap();
            assert!(!period.is_expired_at(inside));
            assert!(period.is_expired_at(outside));
        }

        #[test]
        fn test_contains_start_instant() {
            let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 6, &kolkata()).unwrap();
            assert!(period.contains(issued));
        }

        #[test]
        fn test_contains_excludes_before_start() {
            let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 6, &kolkata()).unwrap();

            let before = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
            assert!(!period.contains(before));
        }

        #[test]
        fn test_days_remaining_counts_down() {
            let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 12, &kolkata()).unwrap();

            let at_start = period.days_remaining(issued);
            assert!((360..=370).contains(&at_start));

            let halfway = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
            assert!(period.days_remaining(halfway) < at_start);
        }

        #[test]
        fn test_days_remaining_zero_after_expiry() {
            let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 6, &kolkata()).unwrap();

            let long_after = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
            assert_eq!(period.days_remaining(long_after), 0);
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_coverage_period_json_roundtrip() {
            let issued = Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap();
            let period = CoveragePeriod::starting(issued, 24, &kolkata()).unwrap();

            let json = serde_json::to_string(&period).unwrap();
            let deserialized: CoveragePeriod = serde_json::from_str(&json).unwrap();
            assert_eq!(period, deserialized);
        }
    }
}

mod timezone {
    use super::*;

    #[test]
    fn test_default_timezone_is_utc() {
        let tz = Timezone::default();
        assert_eq!(tz, Timezone::new(chrono_tz::UTC));
    }

    #[test]
    fn test_start_of_day_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let start = kolkata().start_of_day(date);

        // Midnight IST is 18:30 UTC the previous day.
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 6, 14, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_end_of_day_is_after_start_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let start = kolkata().start_of_day(date);
        let end = kolkata().end_of_day(date);
        assert!(end > start);
    }

    #[test]
    fn test_timezone_parse_roundtrip() {
        let tz: Timezone = "Asia/Kolkata".parse().unwrap();
        assert_eq!(tz, kolkata());
    }

    #[test]
    fn test_timezone_parse_rejects_garbage() {
        let result = "Mars/OlympusMons".parse::<Timezone>();
        assert!(matches!(result, Err(TemporalError::InvalidTimezone(_))));
    }

    #[test]
    fn test_timezone_serde_as_name() {
        let tz = kolkata();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Asia/Kolkata\"");
        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tz);
    }
}
