//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  price × (1 + rate) in floating point:                                  │
//! │    100 × 1.1 = 110.00000000000001                                       │
//! │    floor() happens to survive here, but other prices land on            │
//! │    x.99999999 and lose a whole unit                                     │
//! │                                                                         │
//! │  OUR SOLUTION: integer minor units + basis points                       │
//! │    floor(100 × 11000 / 10000) = 110, exactly, every time                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use scango_core::money::Money;
//!
//! let price = Money::from_minor(500);
//! let doubled = price * 2;
//! assert_eq!(doubled.minor(), 1000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::types::TaxRate;
use crate::BPS_PER_UNIT;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// For yen the smallest unit is the yen itself, so `Money::from_minor(1000)`
/// is ¥1,000. The store API speaks in the same unit.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLineItem.unit_price ──► price_with_tax (floored)
///                                                      │
///                                                      ▼
///                                   × quantity ──► Cart total (tax incl.)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Price including tax, floored to a whole minor unit.
    ///
    /// This is the per-item rounding the store's receipt uses: tax is
    /// applied to ONE unit and the result is floored before any quantity
    /// multiplication.
    ///
    /// ## Implementation
    /// `floor(amount × (10000 + bps) / 10000)` in i128, with Euclidean
    /// division so negative amounts floor toward negative infinity.
    /// Results outside the i64 range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use scango_core::money::Money;
    /// use scango_core::types::TaxRate;
    ///
    /// let rate = TaxRate::from_bps(1000); // 10%
    /// assert_eq!(Money::from_minor(1000).with_tax_floor(rate).minor(), 1100);
    /// assert_eq!(Money::from_minor(155).with_tax_floor(rate).minor(), 170); // 170.5
    /// ```
    pub fn with_tax_floor(&self, rate: TaxRate) -> Money {
        let multiplier = BPS_PER_UNIT as i128 + rate.bps() as i128;
        let floored = (self.0 as i128 * multiplier).div_euclid(BPS_PER_UNIT as i128);
        Money(i64::try_from(floored).unwrap_or(if floored < 0 { i64::MIN } else { i64::MAX }))
    }

    /// The tax portion of [`Money::with_tax_floor`].
    pub fn tax_floor(&self, rate: TaxRate) -> Money {
        self.with_tax_floor(rate) - *self
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates at the i64 bounds instead of wrapping.

/// Displays the amount with thousands separators and no currency symbol.
///
/// The kiosk's display settings add the symbol (see `DisplaySettings`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-{}", grouped)
        } else {
            write!(f, "{}", grouped)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
