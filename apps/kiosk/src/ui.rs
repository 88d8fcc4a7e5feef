//! Console rendering and alerts.
//!
//! Screens are rendered to plain strings so the console prints them and
//! tests can inspect them. Alerts go through a [`Notifier`].

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use crate::state::{DisplaySettings, HomeState, Receipt};

// =============================================================================
// Alerts
// =============================================================================

/// Shows blocking messages to the shopper.
pub trait Notifier: Send {
    fn alert(&self, message: &str);
}

/// Prints alerts to stdout.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        let bar = "!".repeat(message.chars().count().clamp(20, 72) + 4);
        println!("\n{bar}\n! {message}\n{bar}\n");
    }
}

/// Keeps alerts in memory; clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}

// =============================================================================
// Screens
// =============================================================================

pub fn render_loading() -> String {
    "Loading...\n".to_string()
}

pub fn render_welcome() -> String {
    let mut out = String::new();
    out.push_str("=== Welcome to the ScanGo POS ===\n");
    out.push_str("Shop quickly and easily.\n\n");
    out.push_str("How it works\n");
    out.push_str("  1. Type 'start' to begin shopping\n");
    out.push_str("  2. Scan the barcode of each product\n");
    out.push_str("  3. Complete your purchase\n\n");
    out.push_str("If something goes wrong, please ask a member of staff.\n");
    out
}

pub fn render_home(state: &HomeState, display: &DisplaySettings) -> String {
    let mut out = String::new();
    out.push_str("=== ScanGo POS ===                     [logout] finish shopping\n\n");

    if state.camera_open {
        out.push_str("--- Barcode scan ---                    [close] close camera\n");
        if state.scanned_code.is_empty() {
            out.push_str("Hold the barcode in front of the reader ([scan] to read).\n");
        } else {
            let _ = writeln!(out, "Scan succeeded: {}   [rescan]", state.scanned_code);
        }
        return out;
    }

    out.push_str("[camera] scan a barcode   |   [search <code>] enter a code\n");

    if let Some(product) = &state.product_info {
        out.push_str("\n--- Product ---\n");
        let _ = writeln!(out, "{}", product.name);
        let _ = writeln!(out, "{}   [add]", display.format(product.price));
    }

    if !state.purchase_list.is_empty() {
        out.push_str("\n--- Purchase list ---\n");
        // Per-line prices are only meaningful once the rate is known.
        if let Some(rate) = state.tax_rate {
            for (i, item) in state.purchase_list.items().iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:>3}. {} x{}  {}  {} incl. tax   [remove {}]",
                    i + 1,
                    item.name,
                    item.quantity,
                    display.format(item.unit_price),
                    display.format(item.unit_price_with_tax(rate)),
                    i + 1
                );
            }
        }
        let totals = state.totals();
        let _ = write!(out, "Total (incl. tax): {}", display.format(totals.total_with_tax));
        if totals.tax_rate.is_some() {
            let _ = write!(out, "  (tax {})", display.format(totals.tax_included));
        }
        out.push_str("\n[clear] clear list   [purchase] pay\n");
    }

    if state.show_modal {
        if let Some(receipt) = &state.purchase_result {
            out.push('\n');
            out.push_str(&render_receipt(receipt, state, display));
        }
    }

    out
}

pub fn render_receipt(receipt: &Receipt, state: &HomeState, display: &DisplaySettings) -> String {
    let result = &receipt.result;
    let rate = state
        .tax_rate
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut out = String::new();
    out.push_str("+------------- Purchase complete -------------+\n");
    let _ = writeln!(out, "  Transaction ID        {}", result.transaction_id);
    let _ = writeln!(out, "  Total (excl. tax)     {}", display.format(result.total_excluding_tax));
    let _ = writeln!(out, "  Tax ({rate:<4})            {}", display.format(result.tax_amount));
    let _ = writeln!(out, "  Total (incl. tax)     {}", display.format(result.total_including_tax));
    let _ = writeln!(out, "  {}", receipt.completed_at.format("%Y-%m-%d %H:%M"));
    out.push_str("+----------------------------------[ok]-------+\n");
    out
}

/// One-line summary for logs.
pub fn summarize(state: &HomeState) -> String {
    let totals = state.totals();
    format!(
        "{} lines, {} items, total {}",
        totals.line_count,
        totals.total_quantity,
        totals.total_with_tax
    )
}
