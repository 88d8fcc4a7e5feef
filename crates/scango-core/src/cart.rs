//! # Purchase List
//!
//! The ordered list of scanned line items and its tax-inclusive total.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Purchase List Operations                             │
//! │                                                                         │
//! │  Shopper Action           Kiosk Command           List Change           │
//! │  ──────────────           ─────────────           ───────────           │
//! │                                                                         │
//! │  "Add" on product ───────► add_to_cart() ───────► items.push(line)     │
//! │                                                                         │
//! │  "Remove" on line ───────► remove_item() ───────► items.retain(..)     │
//! │                                                                         │
//! │  "Clear list" ───────────► clear_list() ────────► items.clear()        │
//! │                                                                         │
//! │  Receipt dismissed ──────► close_modal() ───────► items.clear()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are kept in insertion order
//! - Adding the same product twice yields two lines of quantity 1
//! - Lines are never edited, only removed
//! - total = Σ floor(unit_price × (1 + rate)) × quantity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, TaxRate};

// =============================================================================
// Line Item
// =============================================================================

/// One entry in the purchase list.
///
/// Product data is copied at the moment it is added, so a later lookup
/// of the same code never changes a line already in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Kiosk-local id used to remove this exact line.
    pub local_id: Uuid,

    /// Store-side product id.
    pub product_id: i64,

    /// Product code at time of adding (frozen).
    pub code: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price excluding tax at time of adding (frozen).
    pub unit_price: Money,

    pub quantity: i64,
}

impl CartLineItem {
    /// Creates a new line of quantity 1 from a looked-up product.
    pub fn from_product(product: &Product) -> Self {
        CartLineItem {
            local_id: Uuid::new_v4(),
            product_id: product.id,
            code: product.code.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// Unit price including tax, floored.
    pub fn unit_price_with_tax(&self, rate: TaxRate) -> Money {
        self.unit_price.with_tax_floor(rate)
    }

    /// Line total excluding tax.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Line total including tax (floored per unit, then multiplied).
    pub fn line_total_with_tax(&self, rate: TaxRate) -> Money {
        self.unit_price_with_tax(rate).multiply_quantity(self.quantity)
    }

    /// Tax portion of [`line_total_with_tax`](Self::line_total_with_tax).
    pub fn line_tax(&self, rate: TaxRate) -> Money {
        self.unit_price.tax_floor(rate).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The purchase list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty list.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Appends a product as a new line and returns that line.
    pub fn add_product(&mut self, product: &Product) -> &CartLineItem {
        self.items.push(CartLineItem::from_product(product));
        let last = self.items.len() - 1;
        &self.items[last]
    }

    /// Removes the line with the given local id.
    pub fn remove_item(&mut self, local_id: Uuid) -> CoreResult<CartLineItem> {
        let position = self
            .items
            .iter()
            .position(|item| item.local_id == local_id)
            .ok_or_else(|| CoreError::LineItemNotFound(local_id.to_string()))?;
        Ok(self.items.remove(position))
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a line by its 1-based display position.
    pub fn line_at(&self, position: usize) -> Option<&CartLineItem> {
        position.checked_sub(1).and_then(|index| self.items.get(index))
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Total excluding tax.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Tax-inclusive total.
    ///
    /// While the tax rate is still unknown the total is zero; the screen
    /// shows no tax-inclusive figures until the rate has been resolved.
    ///
    /// ## Example
    /// ```rust
    /// use scango_core::{Cart, Money, Product, TaxRate};
    ///
    /// let mut cart = Cart::new();
    /// let product = Product { id: 1, code: "1".into(), name: "Tea".into(), price: Money::from_minor(1000) };
    /// cart.add_product(&product);
    ///
    /// assert_eq!(cart.total_with_tax(Some(TaxRate::from_bps(1000))).minor(), 1100);
    /// assert_eq!(cart.total_with_tax(None).minor(), 0);
    /// ```
    pub fn total_with_tax(&self, rate: Option<TaxRate>) -> Money {
        match rate {
            Some(rate) => self.items.iter().map(|i| i.line_total_with_tax(rate)).sum(),
            None => Money::zero(),
        }
    }

    /// Tax contained in [`total_with_tax`](Self::total_with_tax); zero while
    /// the rate is unknown.
    pub fn tax_included(&self, rate: Option<TaxRate>) -> Money {
        match rate {
            Some(rate) => self.items.iter().map(|i| i.line_tax(rate)).sum(),
            None => Money::zero(),
        }
    }

    /// Rejects an empty list before anything is submitted.
    pub fn ensure_not_empty(&self) -> CoreResult<()> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        Ok(())
    }
}

// =============================================================================
// Totals Summary
// =============================================================================

/// Totals summary shown under the purchase list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub total_with_tax: Money,
    pub tax_included: Money,
    pub tax_rate: Option<TaxRate>,
}

impl CartTotals {
    /// Computes the summary for a list at the given (possibly unknown) rate.
    pub fn compute(cart: &Cart, rate: Option<TaxRate>) -> Self {
        CartTotals {
            line_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            total_with_tax: cart.total_with_tax(rate),
            tax_included: cart.tax_included(rate),
            tax_rate: rate,
        }
    }
}
