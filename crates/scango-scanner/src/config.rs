//! The `[scanner]` section of the kiosk configuration.
//!
//! ```toml
//! [scanner]
//! device = "/dev/ttyACM0"   # "-" reads codes from standard input
//! strict_symbology = false  # true: accept EAN-13 / EAN-8 / UPC-A only
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerSettings {
    #[serde(default = "default_device")]
    pub device: String,

    #[serde(default)]
    pub strict_symbology: bool,
}

fn default_device() -> String {
    "-".to_string()
}

impl Default for ScannerSettings {
    fn default() -> Self {
        ScannerSettings {
            device: default_device(),
            strict_symbology: false,
        }
    }
}
