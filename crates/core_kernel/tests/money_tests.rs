//! Comprehensive unit tests for the Money module
//!
//! Tests cover money creation, arithmetic operations, rounding,
//! currency handling, and edge cases.

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(899.00), Currency::INR);
        assert_eq!(m.amount(), dec!(899.00));
        assert_eq!(m.currency(), Currency::INR);
    }

    #[test]
    fn test_inr_shorthand_uses_default_currency() {
        let m = Money::inr(dec!(24999));
        assert_eq!(m.currency(), Currency::INR);
        assert_eq!(m.currency(), Currency::default());
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::inr(dec!(100.123456789));
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_from_minor_converts_paise_correctly() {
        let m = Money::from_minor(89900, Currency::INR);
        assert_eq!(m.amount(), dec!(899.00));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::INR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::INR);
    }

    #[test]
    fn test_negative_amount_creation() {
        let m = Money::inr(dec!(-100.00));
        assert!(m.is_negative());
        assert_eq!(m.amount(), dec!(-100.00));
    }
}

mod predicates {
    use super::*;

    #[test]
    fn test_is_zero_true_for_zero_amount() {
        let m = Money::zero(Currency::INR);
        assert!(m.is_zero());
    }

    #[test]
    fn test_is_zero_false_for_positive_amount() {
        let m = Money::inr(dec!(0.01));
        assert!(!m.is_zero());
    }

    #[test]
    fn test_is_positive_true_for_positive_amount() {
        let m = Money::inr(dec!(100.00));
        assert!(m.is_positive());
    }

    #[test]
    fn test_is_positive_false_for_zero() {
        let m = Money::zero(Currency::INR);
        assert!(!m.is_positive());
    }

    #[test]
    fn test_is_negative_true_for_negative_amount() {
        let m = Money::inr(dec!(-100.00));
        assert!(m.is_negative());
    }

    #[test]
    fn test_is_negative_false_for_zero() {
        let m = Money::zero(Currency::INR);
        assert!(!m.is_negative());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::inr(dec!(100.00));
        let b = Money::inr(dec!(50.00));
        let result = a.checked_add(&b).unwrap();
        assert_eq!(result.amount(), dec!(150.00));
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let a = Money::inr(dec!(100.00));
        let b = Money::new(dec!(50.00), Currency::USD);
        let result = a.checked_add(&b);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_checked_sub_same_currency() {
        let a = Money::inr(dec!(100.00));
        let b = Money::inr(dec!(30.00));
        let result = a.checked_sub(&b).unwrap();
        assert_eq!(result.amount(), dec!(70.00));
    }

    #[test]
    fn test_checked_sub_can_go_negative() {
        let a = Money::inr(dec!(30.00));
        let b = Money::inr(dec!(100.00));
        let result = a.checked_sub(&b).unwrap();
        assert_eq!(result.amount(), dec!(-70.00));
    }

    #[test]
    fn test_add_operator_same_currency() {
        let a = Money::inr(dec!(100.00));
        let b = Money::inr(dec!(50.00));
        let result = a + b;
        assert_eq!(result.amount(), dec!(150.00));
    }

    #[test]
    fn test_negation() {
        let m = Money::inr(dec!(100.00));
        let neg = -m;
        assert_eq!(neg.amount(), dec!(-100.00));
    }

    #[test]
    fn test_multiply_by_scalar() {
        let m = Money::inr(dec!(899));
        let result = m.multiply(dec!(1.8));
        assert_eq!(result.amount(), dec!(1618.2));
    }

    #[test]
    fn test_multiply_operator() {
        let m = Money::inr(dec!(100.00));
        let result = m * dec!(2);
        assert_eq!(result.amount(), dec!(200.00));
    }

    #[test]
    fn test_divide_by_scalar() {
        let m = Money::inr(dec!(100.00));
        let result = m.divide(dec!(4)).unwrap();
        assert_eq!(result.amount(), dec!(25.00));
    }

    #[test]
    fn test_divide_by_zero_error() {
        let m = Money::inr(dec!(100.00));
        let result = m.divide(dec!(0));
        assert!(matches!(result, Err(MoneyError::DivisionByZero)));
    }

    #[test]
    fn test_annual_price_to_daily_display() {
        // A ₹899 yearly plan reads as ₹2.46 a day.
        let m = Money::inr(dec!(899));
        let daily = m.divide(dec!(365)).unwrap().round_to_currency();
        assert_eq!(daily.amount(), dec!(2.46));
    }
}

mod abs_and_rounding {
    use super::*;

    #[test]
    fn test_abs_negative() {
        let m = Money::inr(dec!(-100.00));
        assert_eq!(m.abs().amount(), dec!(100.00));
    }

    #[test]
    fn test_round_to_currency_inr() {
        let m = Money::inr(dec!(100.1234));
        let rounded = m.round_to_currency();
        assert_eq!(rounded.amount(), dec!(100.12));
    }

    #[test]
    fn test_round_bankers() {
        let m = Money::inr(dec!(100.125));
        let rounded = m.round_bankers(2);
        // Banker's rounding: 100.125 -> 100.12 (round to even)
        assert_eq!(rounded.amount(), dec!(100.12));
    }

    #[test]
    fn test_round_bankers_odd_rounds_up() {
        let m = Money::inr(dec!(100.135));
        let rounded = m.round_bankers(2);
        // Banker's rounding: 100.135 -> 100.14 (round to even)
        assert_eq!(rounded.amount(), dec!(100.14));
    }

    #[test]
    fn test_round_bankers_to_whole_rupees() {
        let m = Money::inr(dec!(1078.80));
        assert_eq!(m.round_bankers(0).amount(), dec!(1079));
    }
}

mod currency {
    use super::*;

    #[test]
    fn test_all_currencies_have_symbols() {
        let currencies = [
            Currency::INR,
            Currency::USD,
            Currency::EUR,
            Currency::GBP,
            Currency::SGD,
            Currency::AED,
        ];

        for currency in currencies {
            assert!(!currency.symbol().is_empty());
            assert!(!currency.code().is_empty());
        }
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::INR.code(), "INR");
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::AED.code(), "AED");
    }

    #[test]
    fn test_currency_decimal_places() {
        assert_eq!(Currency::INR.decimal_places(), 2);
        assert_eq!(Currency::USD.decimal_places(), 2);
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(format!("{}", Currency::INR), "INR");
        assert_eq!(format!("{}", Currency::EUR), "EUR");
    }
}

mod display {
    use super::*;

    #[test]
    fn test_money_display_inr() {
        let m = Money::inr(dec!(1234.56));
        let display = format!("{}", m);
        assert!(display.contains("₹"));
        assert!(display.contains("1234.56"));
    }

    #[test]
    fn test_money_display_usd() {
        let m = Money::new(dec!(1234.56), Currency::USD);
        let display = format!("{}", m);
        assert!(display.contains("$"));
    }
}

mod rate {
    use super::*;
    use core_kernel::money::Rate;

    #[test]
    fn test_rate_from_decimal() {
        let rate = Rate::new(dec!(0.20));
        assert_eq!(rate.as_decimal(), dec!(0.20));
    }

    #[test]
    fn test_rate_from_percentage() {
        let rate = Rate::from_percentage(dec!(20.0));
        assert_eq!(rate.as_decimal(), dec!(0.20));
    }

    #[test]
    fn test_rate_as_percentage() {
        let rate = Rate::new(dec!(0.45));
        assert_eq!(rate.as_percentage(), dec!(45.0));
    }

    #[test]
    fn test_rate_apply() {
        let rate = Rate::from_percentage(dec!(10.0));
        let amount = Money::inr(dec!(1000.00));
        let result = rate.apply(&amount);
        assert_eq!(result.amount(), dec!(100.00));
    }

    #[test]
    fn test_rate_load_adds_to_base() {
        let loading = Rate::from_percentage(dec!(45.0));
        let base = Money::inr(dec!(899));
        let loaded = loading.load(&base);
        assert_eq!(loaded.amount(), dec!(1303.55));
    }

    #[test]
    fn test_rate_display() {
        let rate = Rate::from_percentage(dec!(20.0));
        let display = format!("{}", rate);
        assert!(display.contains("20"));
        assert!(display.contains("%"));
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_money_json_roundtrip() {
        let m = Money::inr(dec!(899.00));
        let json = serde_json::to_string(&m).unwrap();
        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }

    #[test]
    fn test_currency_json_roundtrip() {
        let c = Currency::INR;
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"INR\"");
        let deserialized: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(c, deserialized);
    }
}

mod equality {
    use super::*;

    #[test]
    fn test_money_equality_same_values() {
        let a = Money::inr(dec!(100.00));
        let b = Money::inr(dec!(100.00));
        assert_eq!(a, b);
    }

    #[test]
    fn test_money_inequality_different_amounts() {
        let a = Money::inr(dec!(100.00));
        let b = Money::inr(dec!(100.01));
        assert_ne!(a, b);
    }

    #[test]
    fn test_money_inequality_different_currencies() {
        let a = Money::inr(dec!(100.00));
        let b = Money::new(dec!(100.00), Currency::USD);
        assert_ne!(a, b);
    }

    #[test]
    fn test_money_hash_equality() {
        use std::collections::HashSet;

        let a = Money::inr(dec!(100.00));
        let b = Money::inr(dec!(100.00));

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
