//! # Store API Client
//!
//! One method per endpoint. Every Bearer call funnels its response through
//! [`check_status`], which turns a 401 into [`ClientError::Unauthorized`] and
//! any other non-success status into [`ClientError::Status`] carrying the
//! server's `detail` message when one was sent.
//!
//! ## Request Flow
//! ```text
//! ┌──────────┐   build URL    ┌──────────┐   send    ┌─────────────┐
//! │  method  │ ─────────────► │ reqwest  │ ────────► │  store API  │
//! │          │  base + path   │ + bearer │           │             │
//! └──────────┘                └──────────┘           └──────┬──────┘
//!      ▲                                                    │
//!      │   DTO ─► domain type        check_status           │
//!      └──────────────────────────── 2xx / 401 / other ◄────┘
//! ```

use std::time::Duration;

use reqwest::{Response, StatusCode};
use tracing::{debug, info, instrument, warn};
use url::Url;

use scango_core::validation::validate_product_code;
use scango_core::{CartLineItem, Product, PurchaseResult, Session, TaxRate, ValidationError};

use crate::config::ApiSettings;
use crate::dto::{
    AuthStartResponse, ErrorResponse, ProductResponse, PurchaseItem, PurchaseRequest, PurchaseResponse,
    TaxResponse,
};
use crate::error::{ClientError, ClientResult};

/// HTTP client for the store API.
#[derive(Debug, Clone)]
pub struct PosApiClient {
    http: reqwest::Client,
    base: Url,
    tax_id: u32,
}

impl PosApiClient {
    /// Builds a client from validated settings.
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        settings.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {e}")))?;

        Ok(PosApiClient {
            http,
            base: settings.base_url()?,
            tax_id: settings.tax_id,
        })
    }

    /// Base URL every endpoint is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Tax id used by [`fetch_tax_rate`](Self::fetch_tax_rate).
    pub fn tax_id(&self) -> u32 {
        self.tax_id
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base.join(path)?)
    }

    // =========================================================================
    // Endpoints
    // =========================================================================

    /// `POST /auth/start`: opens an anonymous shopping session.
    #[instrument(skip(self))]
    pub async fn start_session(&self) -> ClientResult<Session> {
        let url = self.endpoint("auth/start")?;
        let resp = self.http.post(url).send().await?;
        let body: AuthStartResponse = check_status(resp).await?.json().await?;

        let session = Session::from(body);
        info!(user_id = %session.user_id, "Shopping session started");
        Ok(session)
    }

    /// `GET /tax/{id}`: the current tax rate, normalised to a fraction.
    #[instrument(skip(self, token), fields(tax_id = self.tax_id))]
    pub async fn fetch_tax_rate(&self, token: &str) -> ClientResult<TaxRate> {
        let url = self.endpoint(&format!("tax/{}", self.tax_id))?;
        let resp = self.http.get(url).bearer_auth(token).send().await?;
        let body: TaxResponse = check_status(resp).await?.json().await?;

        let rate = TaxRate::try_from(body)?;
        debug!(%rate, "Tax rate loaded");
        Ok(rate)
    }

    /// `GET /products?code=`: looks a product up by its code.
    ///
    /// The code is trimmed and validated first; an empty code never reaches
    /// the network.
    #[instrument(skip(self, token))]
    pub async fn lookup_product(&self, token: &str, code: &str) -> ClientResult<Product> {
        let code = validate_product_code(code)?;
        let url = self.endpoint("products")?;
        let resp = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[("code", code.as_str())])
            .send()
            .await?;
        let body: ProductResponse = check_status(resp).await?.json().await?;

        let product = Product::try_from(body)?;
        debug!(product_id = product.id, name = %product.name, "Product found");
        Ok(product)
    }

    /// `POST /purchase`: submits the cart lines. An empty list is rejected
    /// locally.
    #[instrument(skip(self, token, items), fields(lines = items.len()))]
    pub async fn submit_purchase(&self, token: &str, items: &[CartLineItem]) -> ClientResult<PurchaseResult> {
        if items.is_empty() {
            return Err(ValidationError::Required {
                field: "items".to_string(),
            }
            .into());
        }

        let request = PurchaseRequest {
            items: items.iter().map(PurchaseItem::from).collect(),
            emp_cd: None,
        };

        let url = self.endpoint("purchase")?;
        let resp = self.http.post(url).bearer_auth(token).json(&request).send().await?;
        let body: PurchaseResponse = check_status(resp).await?.json().await?;

        let result = PurchaseResult::from(body);
        info!(
            transaction_id = result.transaction_id,
            total = %result.total_including_tax,
            "Purchase completed"
        );
        Ok(result)
    }
}

/// Passes 2xx responses through and maps everything else to an error.
async fn check_status(resp: Response) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    if status == StatusCode::UNAUTHORIZED {
        warn!(url = %resp.url(), "Store API rejected the access token");
        return Err(ClientError::Unauthorized);
    }

    // The body is best effort; a non-JSON error page just has no detail.
    let text = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorResponse>(&text)
        .ok()
        .and_then(|body| body.message());

    warn!(status = status.as_u16(), ?detail, "Store API request failed");
    Err(ClientError::Status {
        status: status.as_u16(),
        detail,
    })
}
