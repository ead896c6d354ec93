// Copyright 2025 Cowboy AI, LLC.

//! Fixed-point decimal value object for amounts, quantities and rates.
//!
//! A `Decimal` is an immutable `i128` mantissa with a decimal scale, so
//! `110.50` is mantissa `11050` at scale `2`. Addition is exact, equality is
//! numeric (`1.5 == 1.50`), and the textual form keeps the scale it was
//! written with. The serde representation is that textual form, which keeps
//! amounts lossless across a JSON persistence boundary.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// Largest number of fractional digits a `Decimal` may carry
pub const MAX_SCALE: u32 = 28;

/// Error produced when text is not a valid decimal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal `{input}`: {reason}")]
pub struct DecimalParseError {
    /// The rejected input
    pub input: String,
    /// Why the input was rejected
    pub reason: &'static str,
}

/// Exact decimal number
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    /// Zero at scale 0
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };

    /// Build from a mantissa and scale, `None` if the scale exceeds [`MAX_SCALE`]
    pub fn from_parts(mantissa: i128, scale: u32) -> Option<Self> {
        (scale <= MAX_SCALE).then_some(Self { mantissa, scale })
    }

    /// Build a whole number
    pub fn from_integer(value: i64) -> Self {
        Self {
            mantissa: i128::from(value),
            scale: 0,
        }
    }

    /// The unscaled integer value
    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// Number of fractional digits
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Whether the value is zero at any scale
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Whether the value is below zero
    pub fn is_negative(&self) -> bool {
        self.mantissa < 0
    }

    /// Same value with trailing fractional zeros removed
    pub fn normalize(&self) -> Self {
        let mut mantissa = self.mantissa;
        let mut scale = self.scale;
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        Self { mantissa, scale }
    }

    /// Exact addition, `None` on overflow
    pub fn checked_add(self, other: Decimal) -> Option<Decimal> {
        let scale = self.scale.max(other.scale);
        let left = scale_up(self.mantissa, self.scale, scale)?;
        let right = scale_up(other.mantissa, other.scale, scale)?;
        Some(Decimal {
            mantissa: left.checked_add(right)?,
            scale,
        })
    }
}

fn scale_up(mantissa: i128, from: u32, to: u32) -> Option<i128> {
    let factor = 10i128.checked_pow(to.checked_sub(from)?)?;
    mantissa.checked_mul(factor)
}

impl Default for Decimal {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Decimal {
    type Output = Decimal;

    /// # Panics
    ///
    /// Panics when the exact sum does not fit, like integer overflow.
    fn add(self, rhs: Decimal) -> Decimal {
        match self.checked_add(rhs) {
            Some(sum) => sum,
            None => panic!("decimal addition overflowed: {self} + {rhs}"),
        }
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.normalize();
        let right = other.normalize();
        if left.scale == right.scale {
            return left.mantissa.cmp(&right.mantissa);
        }

        let scale = left.scale.max(right.scale);
        match (
            scale_up(left.mantissa, left.scale, scale),
            scale_up(right.mantissa, right.scale, scale),
        ) {
            (Some(l), Some(r)) => l.cmp(&r),
            // Only the lower-scale side is rescaled; overflow means it is larger in magnitude.
            (None, _) if left.mantissa < 0 => Ordering::Less,
            (None, _) => Ordering::Greater,
            (_, None) if right.mantissa < 0 => Ordering::Greater,
            (_, None) => Ordering::Less,
        }
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.normalize();
        normalized.mantissa.hash(state);
        normalized.scale.hash(state);
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (whole, fraction) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{whole}.{fraction}")
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({self})")
    }
}

impl FromStr for Decimal {
    type Err = DecimalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = |reason| DecimalParseError {
            input: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(reject("no digits"));
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(reject("unexpected character"));
        }
        let scale = u32::try_from(fraction.len()).map_err(|_| reject("too many fractional digits"))?;
        if scale > MAX_SCALE {
            return Err(reject("too many fractional digits"));
        }

        let mut mantissa: i128 = 0;
        for b in whole.bytes().chain(fraction.bytes()) {
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(b - b'0')))
                .ok_or_else(|| reject("value out of range"))?;
        }

        Ok(Decimal {
            mantissa: if negative { -mantissa } else { mantissa },
            scale,
        })
    }
}

impl TryFrom<String> for Decimal {
    type Error = DecimalParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Decimal> for String {
    fn from(value: Decimal) -> Self {
        value.to_string()
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::from_integer(value)
    }
}
