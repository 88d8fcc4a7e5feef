//! # Error Types
//!
//! Domain-specific error types for scango-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  scango-core errors (this file)                                        │
//! │  ├── CoreError        - Purchase list / domain failures                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  scango-client errors                                                  │
//! │  └── ClientError      - HTTP, storage, configuration                   │
//! │                                                                         │
//! │  kiosk errors                                                          │
//! │  └── AppError         - What the shopper sees (alert text)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Alert                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line with this local id is not in the purchase list.
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// The purchase list has no lines.
    ///
    /// ## When This Occurs
    /// - Shopper presses "purchase" before adding anything
    /// - Checked before any network call is made
    #[error("There are no items to purchase")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (control characters, non-finite numbers, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
