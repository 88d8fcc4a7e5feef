//! # Client Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     API                 │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Request        │  │  Unauthorized (401)     │ │
//! │  │  InvalidUrl     │  │  Decode         │  │  Status (non-2xx)       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │    Storage      │  │   Validation    │                              │
//! │  │  read / write   │  │  from core      │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use scango_core::ValidationError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to the store API or the session store.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// API endpoint is not a usable URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Request could not be sent or no response arrived.
    #[error("Request failed: {0}")]
    Request(String),

    /// Response body was not what the endpoint promises.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    // =========================================================================
    // API Errors
    // =========================================================================
    /// The access token was rejected (HTTP 401).
    #[error("Session is no longer valid")]
    Unauthorized,

    /// Any other non-success status.
    #[error("Store API returned {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    /// No session credentials are stored.
    #[error("Not signed in")]
    NotAuthenticated,

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Session storage could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Input rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if the session must be dropped and the shopper sent back
    /// to the welcome screen.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::NotAuthenticated)
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_) | ClientError::InvalidUrl(_)
        )
    }

    /// Server-provided detail message, if the error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
