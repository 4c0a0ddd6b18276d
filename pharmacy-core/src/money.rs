//! Egyptian pound amounts held as integral piastres.
use crate::error::PharmacyError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

pub const PIASTRES_PER_POUND: i64 = 100;

/// An amount in piastres (1 EGP = 100 piastres).
///
/// Persisted records carry prices as plain JSON numbers in pounds (`25`,
/// `25.5`), so serialization converts at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_piastres(piastres: i64) -> Self {
        Self(piastres)
    }

    #[must_use]
    pub const fn from_pounds(pounds: i64) -> Self {
        Self(pounds * PIASTRES_PER_POUND)
    }

    #[must_use]
    pub const fn piastres(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0 * quantity as i64)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_pounds_f64(self) -> f64 {
        self.0 as f64 / PIASTRES_PER_POUND as f64
    }

    /// Parse a price typed in pounds, e.g. `"42"` or `"42.75"`.
    ///
    /// # Errors
    ///
    /// Returns [`PharmacyError::InvalidPrice`] for empty, non-numeric, zero or
    /// negative input.
    pub fn parse_pounds(input: &str) -> Result<Self, PharmacyError> {
        let value: f64 = input
            .trim()
            .parse()
            .map_err(|_| PharmacyError::InvalidPrice)?;
        let money = Self::try_from_pounds_f64(value).ok_or(PharmacyError::InvalidPrice)?;
        if money.is_positive() {
            Ok(money)
        } else {
            Err(PharmacyError::InvalidPrice)
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn try_from_pounds_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let piastres = (value * 100.0).round();
        if piastres.abs() > 9.0e15 {
            return None;
        }
        Some(Self(piastres as i64))
    }

    /// Amount without the currency suffix: `25` or `25.50`.
    #[must_use]
    pub fn amount_text(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / PIASTRES_PER_POUND;
        let frac = abs % PIASTRES_PER_POUND;
        if frac == 0 {
            format!("{sign}{whole}")
        } else {
            format!("{sign}{whole}.{frac:02}")
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} EGP", self.amount_text())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % PIASTRES_PER_POUND == 0 {
            serializer.serialize_i64(self.0 / PIASTRES_PER_POUND)
        } else {
            serializer.serialize_f64(self.as_pounds_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pounds = f64::deserialize(deserializer)?;
        Self::try_from_pounds_f64(pounds)
            .ok_or_else(|| serde::de::Error::custom("price out of range"))
    }
}

/// Cart line text: `"25 EGP × 2 = 50 EGP"`.
#[must_use]
pub fn line_breakdown(unit: Money, quantity: u32) -> String {
    format!("{unit} × {quantity} = {}", unit.times(quantity))
}
