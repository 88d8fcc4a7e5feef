//! # API Settings
//!
//! The `[api]` section of the kiosk configuration.
//!
//! ```toml
//! [api]
//! endpoint = "https://pos.example.com/api"
//! tax_id = 2
//! timeout_secs = 10
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Connection settings for the store API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every endpoint path is joined onto.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Id passed to `GET /tax/{id}`.
    #[serde(default = "default_tax_id")]
    pub tax_id: u32,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_tax_id() -> u32 {
    2
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            endpoint: default_endpoint(),
            tax_id: default_tax_id(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiSettings {
    /// Validates the settings.
    pub fn validate(&self) -> ClientResult<()> {
        self.base_url()?;

        if self.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Parses the endpoint into a base URL that relative paths join onto.
    ///
    /// A trailing slash is added so `https://host/api` + `products` becomes
    /// `https://host/api/products` rather than `https://host/products`.
    pub fn base_url(&self) -> ClientResult<Url> {
        let mut url = Url::parse(self.endpoint.trim())?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API endpoint must start with http:// or https://, got: {}",
                self.endpoint
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}
