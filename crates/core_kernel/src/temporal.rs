//! Coverage period handling
//!
//! Warranty coverage runs from the purchase instant to the end of the expiry
//! day in the business timezone. Expiry is always computed from the period at
//! read time; it is never written back as a status.

use chrono::{DateTime, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper for the business jurisdiction
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Gets the start of day (00:00:00) in this timezone as UTC
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_hms_opt(0, 0, 0)
            .unwrap()
            .and_local_timezone(self.0)
            .single()
            .expect("Invalid timezone conversion")
            .with_timezone(&Utc)
    }

    /// Gets the end of day (23:59:59.999999999) in this timezone as UTC
    pub fn end_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap()
            .and_local_timezone(self.0)
            .single()
            .expect("Invalid timezone conversion")
            .with_timezone(&Utc)
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s)
            .map(Timezone)
            .map_err(|_| TemporalError::InvalidTimezone(s.to_string()))
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Coverage must run for at least one month")]
    EmptyCoverage,

    #[error("Coverage end date overflows the calendar")]
    DateOverflow,

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// The coverage window of an issued warranty
///
/// The expiry instant is fixed at issue time: the local start date plus the
/// plan's months, extended to the end of that day in the business timezone.
/// Month arithmetic clamps at month ends (Jan 31 + 1 month covers through
/// Feb 28/29).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    starts_at: DateTime<Utc>,
    months: u32,
    expires_at: DateTime<Utc>,
}

impl CoveragePeriod {
    /// Creates a coverage period starting at the given instant
    pub fn starting(
        starts_at: DateTime<Utc>,
        months: u32,
        tz: &Timezone,
    ) -> Result<Self, TemporalError> {
        if months == 0 {
            return Err(TemporalError::EmptyCoverage);
        }
        let local_start = tz.to_local(starts_at).date_naive();
        let expiry_date = local_start
            .checked_add_months(Months::new(months))
            .ok_or(TemporalError::DateOverflow)?;
        Ok(Self {
            starts_at,
            months,
            expires_at: tz.end_of_day(expiry_date),
        })
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the period has lapsed at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Returns true if the instant falls inside the coverage window
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.starts_at && instant <= self.expires_at
    }

    /// Whole days of coverage left at the given instant, zero once expired
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_days().max(0)
    }
}
