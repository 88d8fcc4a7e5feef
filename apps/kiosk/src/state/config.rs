//! # Kiosk Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --api-endpoint, --scanner                                          │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SCANGO_API_ENDPOINT=https://pos.example.com/api                    │
//! │     SCANGO_SCANNER_DEVICE=/dev/ttyACM0                                 │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/scango-kiosk/kiosk.toml (Linux)                          │
//! │     ~/Library/Application Support/com.scango.kiosk/kiosk.toml (macOS)  │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! endpoint = "https://pos.example.com/api"
//! tax_id = 2
//! timeout_secs = 10
//!
//! [tax]
//! default_rate = 0.10   # used when the tax lookup fails
//!
//! [storage]
//! path = "/var/lib/scango/session.json"
//!
//! [scanner]
//! device = "/dev/ttyACM0"
//! strict_symbology = false
//!
//! [display]
//! currency_symbol = "¥"
//! decimals = 0
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use scango_client::ApiSettings;
use scango_core::{Money, TaxRate, DEFAULT_TAX_RATE_BPS};
use scango_scanner::ScannerSettings;

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Sections
// =============================================================================

/// Tax fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// Rate used when `GET /tax/{id}` fails. Fraction (0.10) or percentage (10).
    #[serde(default = "default_tax_rate")]
    pub default_rate: f64,
}

fn default_tax_rate() -> f64 {
    f64::from(DEFAULT_TAX_RATE_BPS) / 10_000.0
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings {
            default_rate: default_tax_rate(),
        }
    }
}

impl TaxSettings {
    pub fn default_rate(&self) -> ConfigResult<TaxRate> {
        TaxRate::from_api_value(self.default_rate)
            .map_err(|e| ConfigError::Invalid(format!("tax.default_rate: {e}")))
    }
}

/// Where the session credentials live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Session file. Defaults to `session.json` in the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Keep the session in memory only.
    #[serde(default)]
    pub ephemeral: bool,
}

impl StorageSettings {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("session.json")))
    }
}

/// How amounts are printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Minor-unit digits (0 for yen, 2 for cents).
    #[serde(default)]
    pub decimals: u8,
}

fn default_currency_symbol() -> String {
    "¥".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            decimals: 0,
        }
    }
}

impl DisplaySettings {
    /// Formats an amount: `¥1,100`, or `$11.00` with two decimals.
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let abs = amount.minor().unsigned_abs();
        if self.decimals == 0 {
            let whole = Money::from_minor(i64::try_from(abs).unwrap_or(i64::MAX));
            return format!("{sign}{}{}", self.currency_symbol, whole);
        }

        let scale = 10u64.pow(u32::from(self.decimals));
        let major = Money::from_minor((abs / scale) as i64);
        let frac = abs % scale;
        format!(
            "{sign}{}{}.{:0width$}",
            self.currency_symbol,
            major,
            frac,
            width = usize::from(self.decimals)
        )
    }
}

// =============================================================================
// Main Kiosk Configuration
// =============================================================================

/// Complete kiosk configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub tax: TaxSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub scanner: ScannerSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl KioskConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (kiosk.toml)
    /// 3. Environment variables
    ///
    /// Validation is left to the caller so command-line flags can be
    /// applied first.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading kiosk config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Save("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Save(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::Save(e.to_string()))?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::Save(e.to_string()))?;

        info!(?path, "Kiosk config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.api.validate()?;
        self.tax.default_rate()?;

        if self.display.decimals > 4 {
            return Err(ConfigError::Invalid("display.decimals must be at most 4".into()));
        }

        if !self.storage.ephemeral && self.storage.resolved_path().is_none() {
            return Err(ConfigError::Invalid(
                "storage.path is required when no data directory is available".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("SCANGO_API_ENDPOINT") {
            debug!(endpoint = %endpoint, "Overriding API endpoint from environment");
            self.api.endpoint = endpoint;
        }

        if let Ok(tax_id) = std::env::var("SCANGO_TAX_ID") {
            match tax_id.parse::<u32>() {
                Ok(id) => self.api.tax_id = id,
                Err(_) => warn!(tax_id = %tax_id, "Ignoring invalid SCANGO_TAX_ID"),
            }
        }

        if let Ok(timeout) = std::env::var("SCANGO_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(timeout = %timeout, "Ignoring invalid SCANGO_TIMEOUT_SECS"),
            }
        }

        if let Ok(rate) = std::env::var("SCANGO_DEFAULT_TAX_RATE") {
            match rate.parse::<f64>() {
                Ok(r) => self.tax.default_rate = r,
                Err(_) => warn!(rate = %rate, "Ignoring invalid SCANGO_DEFAULT_TAX_RATE"),
            }
        }

        if let Ok(path) = std::env::var("SCANGO_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Ok(device) = std::env::var("SCANGO_SCANNER_DEVICE") {
            debug!(device = %device, "Overriding scanner device from environment");
            self.scanner.device = device;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("kiosk.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "scango", "kiosk")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = KioskConfig::default();
        assert_eq!(config.api.tax_id, 2);
        assert_eq!(config.tax.default_rate().unwrap().bps(), 1000);
        assert_eq!(config.scanner.device, "-");
        assert_eq!(config.display.currency_symbol, "¥");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiosk.toml");
        std::fs::write(
            &path,
            "[api]\nendpoint = \"https://pos.example.com/api\"\n\n[tax]\ndefault_rate = 8\n",
        )
        .unwrap();

        let config = KioskConfig::from_file(&path).unwrap();
        assert_eq!(config.api.endpoint, "https://pos.example.com/api");
        assert_eq!(config.api.tax_id, 2);
        assert_eq!(config.tax.default_rate().unwrap().bps(), 800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiosk.toml");
        std::fs::write(&path, "[api\n").unwrap();

        let err = KioskConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("kiosk.toml"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("kiosk.toml");

        let mut config = KioskConfig::default();
        config.scanner.device = "/dev/ttyACM0".into();
        config.storage.ephemeral = true;
        config.save(Some(path.clone())).unwrap();

        let loaded = KioskConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = KioskConfig::default();
        config.tax.default_rate = -1.0;
        assert!(config.validate().is_err());

        let mut config = KioskConfig::default();
        config.api.endpoint = "nope".into();
        assert!(matches!(config.validate(), Err(ConfigError::Api(_))));

        let mut config = KioskConfig::default();
        config.display.decimals = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_money_formatting() {
        let yen = DisplaySettings::default();
        assert_eq!(yen.format(Money::from_minor(1100)), "¥1,100");
        assert_eq!(yen.format(Money::from_minor(-2200)), "-¥2,200");

        let dollars = DisplaySettings {
            currency_symbol: "$".into(),
            decimals: 2,
        };
        assert_eq!(dollars.format(Money::from_minor(123_456)), "$1,234.56");
        assert_eq!(dollars.format(Money::from_minor(-5)), "-$0.05");
    }
}
