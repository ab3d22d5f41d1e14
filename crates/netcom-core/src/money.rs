//! # Money Module
//!
//! Provides the `Money` type for Brazilian real amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The storefront sends prices as JSON numbers in reais:                  │
//! │    { "price": 49.9 }                                                    │
//! │                                                                         │
//! │  19.99 * 100 = 1998.9999999999998, so truncating loses a centavo.       │
//! │                                                                         │
//! │  OUR SOLUTION: convert ONCE at the boundary into integer centavos      │
//! │    49.9 → 4990 centavos, and never touch f64 again                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use netcom_core::money::Money;
//!
//! let plan = Money::from_centavos(4990);
//! assert_eq!(plan.to_string(), "R$ 49,90");
//! assert_eq!(Money::from_reais_decimal(1234.5).to_string(), "R$ 1.234,50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a real).
///
/// Serialized as a plain integer of centavos. Wire fields that arrive as
/// decimal reais go through [`reais`] instead.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Converts a decimal amount in reais, as the storefront sends it,
    /// rounding half away from zero to the nearest centavo.
    ///
    /// ## Example
    /// ```rust
    /// use netcom_core::money::Money;
    ///
    /// assert_eq!(Money::from_reais_decimal(49.9).centavos(), 4990);
    /// assert_eq!(Money::from_reais_decimal(0.125).centavos(), 13);
    /// ```
    pub fn from_reais_decimal(reais: f64) -> Self {
        Money((reais * 100.0).round() as i64)
    }

    /// Value in centavos.
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Whole reais portion (truncated toward zero).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Centavos portion, always 0-99.
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Value in reais as a float, for writing back to the wire only.
    pub fn as_reais_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Brazilian formatting: `R$ 1.234,56`, thousands with `.`, decimals with `,`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = self.reais().unsigned_abs().to_string();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{}R$ {},{:02}", sign, grouped, self.centavos_part())
    }
}

// =============================================================================
// Wire Adapter
// =============================================================================

/// Serde adapter for fields the backends encode as decimal reais.
///
/// ```rust
/// use netcom_core::money::Money;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(with = "netcom_core::money::reais")]
///     price: Money,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"price": 59.9}"#).unwrap();
/// assert_eq!(row.price.centavos(), 5990);
/// ```
pub mod reais {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_reais_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("valor deve ser um número finito"));
        }
        Ok(Money::from_reais_decimal(value))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
