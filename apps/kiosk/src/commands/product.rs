//! # Product Commands
//!
//! ```text
//! search_product(code)
//!   │
//!   ├── blank code ───────────► alert "Please enter a product code"
//!   ├── too long / control chars ─► alert the validation message
//!   ├── GET /products?code= ─┬─► 2xx  ─► product_info = product
//!   │                        ├─► 401  ─► clear session, /welcome
//!   │                        └─► else ─► alert "Product not found",
//!   │                                    product_info = None
//! add_to_cart()
//!   └── product_info? ─► new line (qty 1), clear search code + product
//! ```

use scango_client::ClientError;
use scango_core::validation::validate_product_code;
use scango_core::Product;
use tracing::{debug, info};

use crate::error::{AppError, ErrorCode, MSG_CODE_REQUIRED, MSG_PRODUCT_NOT_FOUND};
use crate::kiosk::Kiosk;

impl Kiosk {
    /// Updates the manual entry field.
    pub fn set_search_code(&mut self, code: &str) {
        self.home.search_code = code.to_string();
    }

    /// Searches for whatever is in the manual entry field.
    pub async fn search(&mut self) -> Result<Product, AppError> {
        let code = self.home.search_code.clone();
        self.search_product(&code).await
    }

    /// Looks a product up and shows it.
    pub async fn search_product(&mut self, code: &str) -> Result<Product, AppError> {
        if code.trim().is_empty() {
            return Err(self.fail(AppError::validation(MSG_CODE_REQUIRED)));
        }
        if let Err(e) = validate_product_code(code) {
            debug!(reason = %e, "Code rejected before lookup");
            self.home.product_info = None;
            return Err(self.fail(AppError::from(e)));
        }

        let token = match self.token() {
            Ok(token) => token,
            Err(e) => return Err(self.fail(e)),
        };

        match self.client.lookup_product(&token, code).await {
            Ok(product) => {
                debug!(product_id = product.id, code = %product.code, "Product shown");
                self.home.product_info = Some(product.clone());
                Ok(product)
            }
            Err(e) if e.is_unauthorized() => Err(self.fail(AppError::session_expired())),
            Err(e) => {
                match &e {
                    ClientError::Status { status, .. } => debug!(status, code, "Product lookup rejected"),
                    other => debug!(error = %other, code, "Product lookup failed"),
                }
                self.home.product_info = None;
                Err(self.fail(AppError::new(ErrorCode::NotFound, MSG_PRODUCT_NOT_FOUND)))
            }
        }
    }

    /// Appends the shown product to the purchase list. Does nothing when no
    /// product is shown.
    pub fn add_to_cart(&mut self) -> bool {
        let Some(product) = self.home.product_info.take() else {
            return false;
        };

        let line = self.home.purchase_list.add_product(&product);
        info!(local_id = %line.local_id, name = %line.name, "Added to purchase list");
        self.home.search_code.clear();
        true
    }
}
