//! Device condition grades

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PricingError;

/// Condition grade assigned by the phone checker during inspection
///
/// Grade A is the best condition and prices at the base schedule; B and C
/// carry loadings. Quotes without a grade price at grade A.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Grade {
    #[default]
    A,
    B,
    C,
}

impl Grade {
    pub fn all() -> [Grade; 3] {
        [Grade::A, Grade::B, Grade::C]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Grade {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Grade::A),
            "B" | "b" => Ok(Grade::B),
            "C" | "c" => Ok(Grade::C),
            other => Err(PricingError::UnknownGrade(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grade_is_a() {
        assert_eq!(Grade::default(), Grade::A);
    }

    #[test]
    fn test_parse_accepts_lowercase() {
        assert_eq!("b".parse::<Grade>().unwrap(), Grade::B);
        assert_eq!("C".parse::<Grade>().unwrap(), Grade::C);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "D".parse::<Grade>(),
            Err(PricingError::UnknownGrade(_))
        ));
    }

    #[test]
    fn test_grades_order_by_condition() {
        assert!(Grade::A < Grade::B);
        assert!(Grade::B < Grade::C);
    }
}
