//! # Navigation and Session Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  navigate(to)                                                           │
//! │    │                                                                    │
//! │    ├── follow redirects ("/" ─► "/welcome")                             │
//! │    ├── on "/home"? ─► close camera, drop screen state (even to re-enter)│
//! │    └── entering a guarded route? ─► auth guard ─► fetch tax rate once   │
//! │                                                                         │
//! │  logout()          ─► clear accessToken + userId ─► "/welcome"          │
//! │  expire_session()  ─► same, triggered by any 401                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::kiosk::Kiosk;
use crate::state::{HomeState, Route};

impl Kiosk {
    /// Opens the application at its root route.
    pub async fn launch(&mut self) -> Result<(), AppError> {
        self.navigate(Route::Index).await
    }

    /// Moves to `to`, following redirects and running the home guard.
    pub async fn navigate(&mut self, to: Route) -> Result<(), AppError> {
        let mut target = to;
        while let Some(next) = target.redirect() {
            debug!(from = %target, to = %next, "Redirect");
            target = next;
        }

        if self.route == Route::Home {
            self.leave_home();
        }

        self.route = target;
        info!(route = %target, "Navigated");

        if target.requires_session() {
            self.enter_home().await?;
        }
        Ok(())
    }

    /// Auth guard plus the one-time tax lookup.
    ///
    /// Any reader left open is released first. A failed lookup falls back
    /// to the configured default rate. A 401 expires the session without an
    /// alert.
    pub async fn enter_home(&mut self) -> Result<(), AppError> {
        self.leave_home();

        let token = match self.token() {
            Ok(token) => token,
            Err(e) if e.is_session_expired() => {
                debug!("No stored session, redirecting to welcome");
                self.route = Route::Welcome;
                return Err(e);
            }
            Err(e) => return Err(self.fail(e)),
        };

        self.route = Route::Home;

        match self.client.fetch_tax_rate(&token).await {
            Ok(rate) => {
                info!(%rate, "Tax rate set");
                self.home.tax_rate = Some(rate);
            }
            Err(e) if e.is_unauthorized() => return Err(self.fail(AppError::session_expired())),
            Err(e) => {
                warn!(error = %e, default = %self.default_tax, "Tax lookup failed, using default rate");
                self.home.tax_rate = Some(self.default_tax);
            }
        }
        Ok(())
    }

    /// "Finish shopping": forget the session and return to the welcome screen.
    pub fn logout(&mut self) {
        info!("Shopper finished");
        self.clear_session();
        self.leave_home();
        self.route = Route::Welcome;
    }

    /// The store rejected the token.
    pub fn expire_session(&mut self) {
        warn!("Session expired, returning to welcome screen");
        self.clear_session();
        self.leave_home();
        self.route = Route::Welcome;
    }

    fn clear_session(&mut self) {
        if let Err(e) = self.session.clear() {
            error!(error = %e, "Failed to clear session storage");
        }
    }

    /// Screen teardown: release the reader and drop all screen state.
    fn leave_home(&mut self) {
        self.close_camera();
        self.home = HomeState::new();
    }
}
