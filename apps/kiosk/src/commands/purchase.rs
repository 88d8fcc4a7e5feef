//! # Purchase Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  purchase()                                                             │
//! │    │                                                                    │
//! │    ├── empty list ─► alert "There are no items to purchase" (no I/O)    │
//! │    │                                                                    │
//! │    └── POST /purchase { items, emp_cd: null }                           │
//! │          ├── 2xx  ─► receipt stored, modal shown                        │
//! │          ├── 401  ─► clear session, /welcome                            │
//! │          └── else ─► alert(detail) or "Purchase failed"                 │
//! │                                                                         │
//! │  close_modal()                                                          │
//! │    └── hide modal, drop receipt, clear list, search code, product       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use scango_core::PurchaseResult;
use tracing::{info, warn};

use crate::error::{AppError, ErrorCode, MSG_PURCHASE_FAILED};
use crate::kiosk::Kiosk;
use crate::state::Receipt;
use crate::ui;

impl Kiosk {
    /// Submits the purchase list.
    pub async fn purchase(&mut self) -> Result<PurchaseResult, AppError> {
        if let Err(e) = self.home.purchase_list.ensure_not_empty() {
            return Err(self.fail(e.into()));
        }

        let token = match self.token() {
            Ok(token) => token,
            Err(e) => return Err(self.fail(e)),
        };

        info!(summary = %ui::summarize(&self.home), "Submitting purchase");
        match self.client.submit_purchase(&token, self.home.purchase_list.items()).await {
            Ok(result) => {
                self.home.purchase_result = Some(Receipt::new(result.clone()));
                self.home.show_modal = true;
                Ok(result)
            }
            Err(e) if e.is_unauthorized() => Err(self.fail(AppError::session_expired())),
            Err(e) => {
                warn!(error = %e, "Purchase failed");
                let message = e.detail().unwrap_or(MSG_PURCHASE_FAILED).to_string();
                Err(self.fail(AppError::new(ErrorCode::PurchaseFailed, message)))
            }
        }
    }

    /// Dismisses the confirmation and starts over with an empty list.
    pub fn close_modal(&mut self) {
        self.home.reset_after_purchase();
    }
}
