//! # scango-core: Pure Business Logic for ScanGo POS
//!
//! This crate holds everything the kiosk computes on its own: money,
//! tax rates, the product snapshot returned by a lookup, and the purchase
//! list with its tax-inclusive total. It never touches the network, the
//! file system or a device.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ScanGo Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Kiosk console (apps/kiosk)                   │   │
//! │  │    Welcome ──► Scan / Search ──► Purchase list ──► Receipt      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ scango-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  TaxRate  │  │ floor tax │  │ LineItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          scango-client (REST API + session storage)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, TaxRate, PurchaseResult, Session)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The purchase list and its totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use scango_core::money::Money;
//! use scango_core::types::TaxRate;
//!
//! let price = Money::from_minor(1000);
//! let rate = TaxRate::from_fraction(0.10);
//!
//! // Per-item price with tax is floored, never rounded up
//! assert_eq!(price.with_tax_floor(rate).minor(), 1100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax rate used when the tax lookup fails (10%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// Basis points in one whole (100%).
pub const BPS_PER_UNIT: u32 = 10_000;
