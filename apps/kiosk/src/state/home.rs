//! # Home Screen State
//!
//! Everything the shopping screen shows lives in one [`HomeState`]. The
//! commands in `commands/` are the only writers.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Idle ──open_camera──► CameraOpen/Scanning ──code──► CodeDetected       │
//! │   ▲                          │                           │              │
//! │   │                     close_camera                search_product      │
//! │   │                          ▼                           ▼              │
//! │   │                        Idle ◄──────────────── ProductFetched        │
//! │   │                                                      │              │
//! │   │                                                 add_to_cart         │
//! │   │                                                      ▼              │
//! │   │                                                  InCart ──┐         │
//! │   │                                                     ▲     │purchase │
//! │   │                                              (repeat)┘     ▼         │
//! │   └──────────────────── close_modal ───────────────── ResultShown       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local};

use scango_core::{Cart, CartTotals, Product, PurchaseResult, TaxRate};

/// A completed purchase as shown in the confirmation modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub result: PurchaseResult,
    pub completed_at: DateTime<Local>,
}

impl Receipt {
    pub fn new(result: PurchaseResult) -> Self {
        Receipt {
            result,
            completed_at: Local::now(),
        }
    }
}

/// Which step of the shopping flow the screen is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    CameraOpen,
    Scanning,
    CodeDetected,
    ProductFetched,
    InCart,
    ResultShown,
}

/// State of the shopping screen.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub camera_open: bool,
    pub scanning: bool,
    pub scanned_code: String,
    pub search_code: String,
    pub product_info: Option<Product>,
    pub purchase_list: Cart,
    pub show_modal: bool,
    pub purchase_result: Option<Receipt>,
    /// `None` until the tax lookup settles.
    pub tax_rate: Option<TaxRate>,
}

impl HomeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.show_modal && self.purchase_result.is_some() {
            Phase::ResultShown
        } else if self.camera_open && self.scanning {
            Phase::Scanning
        } else if self.camera_open && !self.scanned_code.is_empty() {
            Phase::CodeDetected
        } else if self.camera_open {
            Phase::CameraOpen
        } else if self.product_info.is_some() {
            Phase::ProductFetched
        } else if !self.purchase_list.is_empty() {
            Phase::InCart
        } else {
            Phase::Idle
        }
    }

    /// Tax-inclusive total; zero while the rate is unknown.
    pub fn total(&self) -> scango_core::Money {
        self.purchase_list.total_with_tax(self.tax_rate)
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.purchase_list, self.tax_rate)
    }

    /// Camera flags off and the scanned code forgotten.
    pub fn reset_camera(&mut self) {
        self.camera_open = false;
        self.scanning = false;
        self.scanned_code.clear();
    }

    /// Back to an empty screen after the confirmation is dismissed.
    pub fn reset_after_purchase(&mut self) {
        self.show_modal = false;
        self.purchase_result = None;
        self.purchase_list.clear();
        self.search_code.clear();
        self.product_info = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scango_core::Money;

    fn product(price: i64) -> Product {
        Product {
            id: 1,
            code: "4901234567894".into(),
            name: "Green tea".into(),
            price: Money::from_minor(price),
        }
    }

    #[test]
    fn test_phases() {
        let mut state = HomeState::new();
        assert_eq!(state.phase(), Phase::Idle);

        state.camera_open = true;
        assert_eq!(state.phase(), Phase::CameraOpen);
        state.scanning = true;
        assert_eq!(state.phase(), Phase::Scanning);
        state.scanning = false;
        state.scanned_code = "4901234567894".into();
        assert_eq!(state.phase(), Phase::CodeDetected);

        state.reset_camera();
        state.product_info = Some(product(1000));
        assert_eq!(state.phase(), Phase::ProductFetched);

        state.product_info = None;
        state.purchase_list.add_product(&product(1000));
        assert_eq!(state.phase(), Phase::InCart);
    }

    #[test]
    fn test_total_unknown_rate_is_zero() {
        let mut state = HomeState::new();
        state.purchase_list.add_product(&product(1000));
        assert_eq!(state.total(), Money::zero());

        state.tax_rate = Some(TaxRate::from_bps(1000));
        assert_eq!(state.total().minor(), 1100);
    }

    #[test]
    fn test_reset_after_purchase() {
        let mut state = HomeState::new();
        state.purchase_list.add_product(&product(500));
        state.search_code = "x".into();
        state.product_info = Some(product(500));
        state.show_modal = true;
        state.purchase_result = Some(Receipt::new(PurchaseResult {
            transaction_id: 1,
            total_excluding_tax: Money::from_minor(500),
            tax_amount: Money::from_minor(50),
            total_including_tax: Money::from_minor(550),
        }));
        assert_eq!(state.phase(), Phase::ResultShown);

        state.reset_after_purchase();
        assert!(state.purchase_list.is_empty());
        assert!(state.search_code.is_empty());
        assert!(state.product_info.is_none());
        assert!(state.purchase_result.is_none());
        assert_eq!(state.phase(), Phase::Idle);
    }
}
