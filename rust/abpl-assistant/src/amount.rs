//! Money amounts in whole cents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AssistantError;

/// A non-negative amount of money, stored in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(cents: u64) -> Self {
        Amount(cents)
    }

    /// Saturates at the largest representable amount.
    pub fn from_dollars(dollars: u64) -> Self {
        Amount(dollars.saturating_mul(100))
    }

    pub fn checked_from_dollars(dollars: u64) -> Option<Self> {
        dollars.checked_mul(100).map(Amount)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }

    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }

    /// `percent` of this amount, rounded up to the next cent.
    pub fn percent(self, percent: u64) -> Amount {
        let cents = (u128::from(self.0) * u128::from(percent)).div_ceil(100);
        Amount(u64::try_from(cents).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Amount {
    type Err = AssistantError;

    /// Accepts "$2000", "2000", "2000.5" and "$2000.50".
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || AssistantError::InvalidAmount {
            text: text.to_string(),
        };
        let digits = text.trim();
        let digits = digits.strip_prefix('$').unwrap_or(digits);
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) || fraction.len() > 2
        {
            return Err(invalid());
        }

        let dollars: u64 = whole.parse().map_err(|_| invalid())?;
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        dollars
            .checked_mul(100)
            .and_then(|total| total.checked_add(cents))
            .map(Amount)
            .ok_or_else(invalid)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Whole(u64),
            Dollars(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Repr::Whole(dollars) => Amount::checked_from_dollars(dollars).ok_or_else(|| {
                serde::de::Error::custom(format!("${dollars} is too large an amount"))
            }),
            Repr::Dollars(dollars) if dollars.is_finite() && dollars >= 0.0 => {
                let cents = (dollars * 100.0).round();
                if cents < u64::MAX as f64 {
                    Ok(Amount(cents as u64))
                } else {
                    Err(serde::de::Error::custom(format!(
                        "${dollars} is too large an amount"
                    )))
                }
            }
            Repr::Dollars(dollars) => Err(serde::de::Error::custom(format!(
                "{dollars} is not an amount of money"
            ))),
        }
    }
}
