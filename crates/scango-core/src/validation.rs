//! # Validation Module
//!
//! Input validation for ScanGo.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Barcode decoder (scango-scanner)                             │
//! │  └── check digits, symbology framing                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── product code present before any lookup                            │
//! │  ├── purchase list non-empty before any submission                     │
//! │  └── tax rate within 0..=100%                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store API                                                    │
//! │  └── unknown codes, rejected purchases                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::BPS_PER_UNIT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest code accepted for a lookup.
pub const MAX_PRODUCT_CODE_LEN: usize = 64;

/// Highest unit price accepted from the store, in minor units.
pub const MAX_PRICE: i64 = 100_000_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code typed or scanned by the shopper.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 64 characters
/// - No control characters
///
/// ## Returns
/// The trimmed code.
///
/// ## Example
/// ```rust
/// use scango_core::validation::validate_product_code;
///
/// assert_eq!(validate_product_code(" 4901234567894 ").unwrap(), "4901234567894");
/// assert!(validate_product_code("   ").is_err());
/// ```
pub fn validate_product_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "product code".to_string(),
        });
    }

    if code.chars().count() > MAX_PRODUCT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "product code".to_string(),
            max: MAX_PRODUCT_CODE_LEN,
        });
    }

    if code.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "product code".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(code.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > BPS_PER_UNIT {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: BPS_PER_UNIT as i64,
        });
    }

    Ok(())
}

/// Validates a unit price in minor units.
///
/// Zero is allowed (free items). Anything above [`MAX_PRICE`] is rejected
/// so cart arithmetic stays far from the i64 bounds.
pub fn validate_price(minor: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE).contains(&minor) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }

    Ok(())
}
