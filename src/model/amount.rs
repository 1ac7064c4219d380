//! Exact currency amounts.
//!
//! Prices are whole currency units (rupiah), so an `Amount` is a `u64` and all
//! totals are integer sums. The server is loose about the JSON type of a
//! price: the admin form posts it as text, so decoding accepts integers,
//! integral floats and numeric strings.
//!
//! Decoded and parsed amounts are capped at [`Amount::MAX`]. Arithmetic
//! saturates, so totals of hand-built amounts past the cap never panic.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use thiserror::Error;

/// A non-negative amount of money in whole currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(pub u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Largest amount accepted from the wire or from a form.
    pub const MAX: Amount = Amount(1_000_000_000_000_000);

    /// Price of `quantity` units at this unit price.
    pub fn times(self, quantity: u32) -> Amount {
        Amount(self.0.saturating_mul(u64::from(quantity)))
    }

    fn bounded(value: u64) -> Option<Amount> {
        (value <= Self::MAX.0).then_some(Amount(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// Formats with `.` thousands separators, e.g. `20.000`.
    pub fn grouped(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        out
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(value)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

/// The text is not a non-negative whole number up to [`Amount::MAX`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid amount: {0:?}")]
pub struct ParseAmountError(pub String);

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAmountError(s.to_string()));
        }
        trimmed
            .parse::<u64>()
            .ok()
            .and_then(Amount::bounded)
            .ok_or_else(|| ParseAmountError(s.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(u64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Int(value) => Amount::bounded(value).ok_or_else(|| out_of_range(value)),
            RawAmount::Float(value) if value >= 0.0 && value.fract() == 0.0 && value <= Amount::MAX.0 as f64 => {
                Ok(Amount(value as u64))
            }
            RawAmount::Float(value) => Err(serde::de::Error::custom(format!(
                "amount must be a whole number from 0 to {}, got {value}",
                Amount::MAX
            ))),
            RawAmount::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

fn out_of_range<E: serde::de::Error>(value: u64) -> E {
    E::custom(format!("amount {value} exceeds {}", Amount::MAX))
}
