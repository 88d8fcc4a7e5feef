//! Wire shapes of the store API.
//!
//! Field names follow the API (`prd_id`, `trd_id`, `ttl_amt_ex_tax`, ...);
//! conversions into the `scango-core` domain types live here so nothing
//! outside this crate sees the wire vocabulary.

use serde::{Deserialize, Serialize};

use scango_core::validation::validate_price;
use scango_core::{CartLineItem, Money, Product, PurchaseResult, Session, TaxRate, ValidationError};

// =============================================================================
// Lenient scalars
// =============================================================================

/// A value the API sends either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrString {
    /// Renders the value as the string the session store keeps.
    pub fn into_string(self) -> String {
        match self {
            NumberOrString::Int(n) => n.to_string(),
            NumberOrString::Float(f) => f.to_string(),
            NumberOrString::Text(s) => s,
        }
    }

    /// Parses the value as a float, accepting numeric strings.
    pub fn as_f64(&self) -> Result<f64, ValidationError> {
        match self {
            NumberOrString::Int(n) => Ok(*n as f64),
            NumberOrString::Float(f) => Ok(*f),
            NumberOrString::Text(s) => s.trim().parse::<f64>().map_err(|_| ValidationError::InvalidFormat {
                field: "tax_rate".to_string(),
                reason: format!("'{s}' is not a number"),
            }),
        }
    }
}

// =============================================================================
// POST /auth/start
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AuthStartResponse {
    pub access_token: String,
    pub user_id: NumberOrString,
}

impl From<AuthStartResponse> for Session {
    fn from(resp: AuthStartResponse) -> Self {
        Session {
            access_token: resp.access_token,
            user_id: resp.user_id.into_string(),
        }
    }
}

// =============================================================================
// GET /tax/{id}
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct TaxResponse {
    pub tax_rate: NumberOrString,
}

impl TryFrom<TaxResponse> for TaxRate {
    type Error = ValidationError;

    fn try_from(resp: TaxResponse) -> Result<Self, Self::Error> {
        TaxRate::from_api_value(resp.tax_rate.as_f64()?)
    }
}

// =============================================================================
// GET /products?code=
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    pub prd_id: i64,
    pub code: String,
    pub name: String,
    pub price: i64,
}

impl TryFrom<ProductResponse> for Product {
    type Error = ValidationError;

    fn try_from(resp: ProductResponse) -> Result<Self, Self::Error> {
        validate_price(resp.price)?;
        Ok(Product {
            id: resp.prd_id,
            code: resp.code,
            name: resp.name,
            price: Money::from_minor(resp.price),
        })
    }
}

// =============================================================================
// POST /purchase
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    pub prd_id: i64,
    pub code: String,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
}

impl From<&CartLineItem> for PurchaseItem {
    fn from(item: &CartLineItem) -> Self {
        PurchaseItem {
            prd_id: item.product_id,
            code: item.code.clone(),
            name: item.name.clone(),
            price: item.unit_price.minor(),
            quantity: item.quantity,
        }
    }
}

/// Body of `POST /purchase`. `emp_cd` is always sent, as `null` for
/// self-checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub items: Vec<PurchaseItem>,
    pub emp_cd: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseResponse {
    pub trd_id: i64,
    pub ttl_amt_ex_tax: i64,
    pub tax_amt: i64,
    pub total_amt: i64,
}

impl From<PurchaseResponse> for PurchaseResult {
    fn from(resp: PurchaseResponse) -> Self {
        PurchaseResult {
            transaction_id: resp.trd_id,
            total_excluding_tax: Money::from_minor(resp.ttl_amt_ex_tax),
            tax_amount: Money::from_minor(resp.tax_amt),
            total_including_tax: Money::from_minor(resp.total_amt),
        }
    }
}

// =============================================================================
// Error bodies
// =============================================================================

/// Error body of a rejected request. `detail` is usually a string but
/// validation failures send a list of objects.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// The message to show the shopper, if any.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
