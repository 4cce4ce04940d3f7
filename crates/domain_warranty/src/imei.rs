//! IMEI value object
//!
//! Every inspection report is keyed by the device IMEI, and the store
//! enforces that at most one report exists per IMEI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing an IMEI
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImeiError {
    /// Wrong number of characters
    #[error("IMEI must be exactly 15 digits, got {0} characters")]
    WrongLength(usize),

    /// Non-digit character present
    #[error("IMEI must contain only ASCII digits")]
    NonDigit,
}

/// A 15-digit device IMEI
///
/// Validated on construction; serialized as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Imei(String);

impl Imei {
    /// Parses and validates an IMEI
    ///
    /// # Errors
    ///
    /// Returns error if the value is not exactly 15 ASCII digits
    pub fn parse(value: impl Into<String>) -> Result<Self, ImeiError> {
        let value = value.into();
        if value.len() != 15 {
            return Err(ImeiError::WrongLength(value.len()));
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ImeiError::NonDigit);
        }
        Ok(Imei(value))
    }

    /// Returns the IMEI as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Imei {
    type Err = ImeiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Imei::parse(s)
    }
}

impl TryFrom<String> for Imei {
    type Error = ImeiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Imei::parse(value)
    }
}

impl From<Imei> for String {
    fn from(imei: Imei) -> Self {
        imei.0
    }
}
