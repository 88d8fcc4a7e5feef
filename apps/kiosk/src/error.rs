//! # Kiosk Error Type
//!
//! Every command failure ends up as an [`AppError`]: a machine-readable
//! [`ErrorCode`] plus the text shown to the shopper in a blocking alert.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Kiosk                              │
//! │                                                                         │
//! │  ValidationError ─┐                                                     │
//! │  CoreError ───────┤                                                     │
//! │  ClientError ─────┼──► AppError { code, message }                       │
//! │  ScanError ───────┤          │                                          │
//! │  ConfigError ─────┘          ▼                                          │
//! │                    code == SessionExpired?                              │
//! │                      yes ─► clear session, go to /welcome (no alert)    │
//! │                      no  ─► alert(message)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration problems are fatal at start-up and use [`ConfigError`]
//! instead; `main` reports them through `anyhow`.

use std::path::PathBuf;

use scango_client::ClientError;
use scango_core::{CoreError, ValidationError};
use scango_scanner::ScanError;
use thiserror::Error;

// =============================================================================
// Alert texts
// =============================================================================

pub const MSG_START_FAILED: &str = "Could not start shopping. Please try again.";
pub const MSG_CODE_REQUIRED: &str = "Please enter a product code";
pub const MSG_PRODUCT_NOT_FOUND: &str = "Product not found";
pub const MSG_EMPTY_CART: &str = "There are no items to purchase";
pub const MSG_PURCHASE_FAILED: &str = "Purchase failed";
pub const MSG_CAMERA_FAILED: &str = "Could not start the barcode reader";

// =============================================================================
// AppError
// =============================================================================

/// A failed kiosk command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// Machine-readable error code for logs and tests
    pub code: ErrorCode,

    /// Alert text for the shopper
    pub message: String,
}

/// Error codes for kiosk commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The store API rejected the token, or none is stored
    SessionExpired,

    /// Could not open a shopping session
    SessionStart,

    /// Input rejected before any request
    Validation,

    /// Product lookup failed
    NotFound,

    /// Purchase attempted with no lines
    EmptyCart,

    /// Purchase rejected or not delivered
    PurchaseFailed,

    /// Barcode reader failure
    Scanner,

    /// Session storage failure
    Storage,

    /// Network or unexpected response
    Network,

    /// Anything else
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn session_expired() -> Self {
        AppError::new(ErrorCode::SessionExpired, "Session expired")
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Validation, message)
    }

    pub fn is_session_expired(&self) -> bool {
        self.code == ErrorCode::SessionExpired
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Generic mapping; commands that have a specific alert text for a failure
/// build their own `AppError` instead.
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized | ClientError::NotAuthenticated => AppError::session_expired(),
            ClientError::Validation(e) => AppError::from(e),
            ClientError::Storage(e) => {
                tracing::error!("Session storage failed: {}", e);
                AppError::new(ErrorCode::Storage, "Could not access session storage")
            }
            ClientError::Status { detail: Some(detail), .. } => AppError::new(ErrorCode::Network, detail),
            other => {
                tracing::error!("Store API call failed: {}", other);
                AppError::new(ErrorCode::Network, "Could not reach the store")
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => AppError::new(ErrorCode::EmptyCart, MSG_EMPTY_CART),
            CoreError::LineItemNotFound(id) => {
                AppError::new(ErrorCode::Validation, format!("No such item in the list: {id}"))
            }
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        tracing::warn!("Barcode reader error: {}", err);
        AppError::new(ErrorCode::Scanner, MSG_CAMERA_FAILED)
    }
}

// =============================================================================
// ConfigError
// =============================================================================

/// Start-up configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config: {0}")]
    Save(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Api(#[from] ClientError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
