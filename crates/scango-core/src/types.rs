//! # Domain Types
//!
//! Core domain types used throughout ScanGo.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  PurchaseResult │   │    Session      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  transaction_id │   │  access_token   │       │
//! │  │  code (barcode) │   │  excl. tax      │   │  user_id        │       │
//! │  │  name           │   │  tax            │   └─────────────────┘       │
//! │  │  price          │   │  incl. tax      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │    TaxRate      │   fetched once per session, 10% when the          │
//! │  │  ─────────────  │   lookup fails                                    │
//! │  │  bps (u32)      │                                                   │
//! │  │  1000 = 10%     │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these types are cached: a product lives until it is added to the
//! list or replaced by the next lookup, and a purchase result lives until
//! the receipt is dismissed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_tax_rate_bps;
use crate::{BPS_PER_UNIT, DEFAULT_TAX_RATE_BPS};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1000 bps = 10% and 800 bps = 8%.
/// Integer rates keep [`Money::with_tax_floor`] exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a fraction (0.10 = 10%).
    pub fn from_fraction(fraction: f64) -> Self {
        TaxRate((fraction * BPS_PER_UNIT as f64).round() as u32)
    }

    /// Interprets a rate as stored by the store API.
    ///
    /// ## Normalisation
    /// Some stores keep `0.10`, others keep `10`. Anything above 1 is a
    /// percentage and is divided by 100 first.
    ///
    /// ```rust
    /// use scango_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_api_value(0.10).unwrap().bps(), 1000);
    /// assert_eq!(TaxRate::from_api_value(10.0).unwrap().bps(), 1000);
    /// assert!(TaxRate::from_api_value(-1.0).is_err());
    /// ```
    pub fn from_api_value(raw: f64) -> Result<Self, ValidationError> {
        if !raw.is_finite() || raw < 0.0 {
            return Err(ValidationError::InvalidFormat {
                field: "tax_rate".to_string(),
                reason: format!("{raw} is not a usable rate"),
            });
        }

        let fraction = if raw > 1.0 { raw / 100.0 } else { raw };
        let bps = (fraction * BPS_PER_UNIT as f64).round();
        if bps > u32::MAX as f64 {
            return Err(ValidationError::OutOfRange {
                field: "tax_rate".to_string(),
                min: 0,
                max: BPS_PER_UNIT as i64,
            });
        }

        let bps = bps as u32;
        validate_tax_rate_bps(bps)?;
        Ok(TaxRate(bps))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / BPS_PER_UNIT as f64
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

/// The fallback rate used when the lookup fails (10%).
impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(DEFAULT_TAX_RATE_BPS)
    }
}

/// `10%`, `8.25%`
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            let pct = format!("{:.2}", self.percentage());
            write!(f, "{}%", pct.trim_end_matches('0'))
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as returned by a code lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-side product id.
    pub id: i64,

    /// Barcode / product code the product was found by.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Unit price excluding tax.
    pub price: Money,
}

// =============================================================================
// Purchase Result
// =============================================================================

/// Totals of a completed purchase, as computed by the store.
///
/// Shown on the receipt modal, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseResult {
    pub transaction_id: i64,
    pub total_excluding_tax: Money,
    pub tax_amount: Money,
    pub total_including_tax: Money,
}

// =============================================================================
// Session
// =============================================================================

/// Credentials issued by the welcome step.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
