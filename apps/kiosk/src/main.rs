//! # ScanGo Kiosk Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ScanGo Kiosk                                     │
//! │                                                                         │
//! │  main.rs ────► hands off to scango_kiosk::run()                        │
//! │  lib.rs ─────► logging, configuration, console loop                    │
//! │                                                                         │
//! │  Store API (HTTP/JSON)          Barcode reader (stdin or device file)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for testability
    scango_kiosk::run()
}
