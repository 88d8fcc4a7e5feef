//! Welcome screen.

use tracing::{error, info};

use crate::error::{AppError, ErrorCode, MSG_START_FAILED};
use crate::kiosk::Kiosk;
use crate::state::Route;

impl Kiosk {
    /// "Start shopping": opens a session, stores it and moves to the home
    /// screen. Any failure keeps the shopper on the welcome screen.
    pub async fn start_shopping(&mut self) -> Result<(), AppError> {
        let session = match self.client.start_session().await {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "Could not start session");
                return Err(self.fail(AppError::new(ErrorCode::SessionStart, MSG_START_FAILED)));
            }
        };

        if let Err(e) = self.session.save(&session) {
            error!(error = %e, "Could not store session");
            return Err(self.fail(AppError::new(ErrorCode::SessionStart, MSG_START_FAILED)));
        }

        info!(user_id = %session.user_id, "Shopping started");
        self.navigate(Route::Home).await
    }
}
