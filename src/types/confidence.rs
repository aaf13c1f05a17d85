//! Exact-decimal confidence score.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, TitleLangError};

/// Language detection confidence in `[0, 1]`.
///
/// Held as a base-10 [`Decimal`] end to end: the digits the analysis service
/// produced are the digits that get stored and returned. Serializes as a JSON
/// string (`"0.87"`) so no consumer ever sees a binary float.
///
/// ```rust
/// # use titlelang::Confidence;
/// let c: Confidence = "0.87".parse().unwrap();
/// assert_eq!(c.to_string(), "0.87");
/// assert!("1.5".parse::<Confidence>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Confidence(Decimal);

impl Confidence {
    /// Wrap a decimal, rejecting values outside `[0, 1]`.
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(TitleLangError::MalformedResponse(format!(
                "confidence {value} is outside [0, 1]"
            )));
        }
        Ok(Self(value))
    }

    /// The underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Confidence {
    type Err = TitleLangError;

    /// Accepts plain (`0.95`) and scientific (`9.5e-1`) notation.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let value = Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|e| {
                TitleLangError::MalformedResponse(format!("confidence {s:?} is not a number: {e}"))
            })?;
        Self::new(value)
    }
}

impl TryFrom<String> for Confidence {
    type Error = TitleLangError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Confidence> for String {
    fn from(value: Confidence) -> Self {
        value.0.to_string()
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
