//! The kiosk itself: screen state plus the services the commands use.
//!
//! Commands live in `commands/` as `impl Kiosk` blocks, one file per
//! screen concern. Every public command applies its own side effects
//! (alerts, session expiry, navigation) before returning, so callers only
//! need the `Result` to decide what to print next.

use std::sync::Arc;

use scango_client::{FileStorage, PosApiClient, SessionStore};
use scango_core::TaxRate;
use scango_scanner::Scanner;
use tracing::{debug, info};

use crate::error::{AppError, ConfigError, ConfigResult};
use crate::state::{DisplaySettings, HomeState, KioskConfig, Route};
use crate::ui::{self, Notifier};

pub struct Kiosk {
    pub(crate) client: PosApiClient,
    pub(crate) session: SessionStore,
    pub(crate) scanner: Option<Scanner>,
    pub(crate) notifier: Box<dyn Notifier>,
    pub(crate) route: Route,
    pub(crate) home: HomeState,
    pub(crate) default_tax: TaxRate,
    pub(crate) display: DisplaySettings,
}

impl std::fmt::Debug for Kiosk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kiosk")
            .field("route", &self.route)
            .field("phase", &self.home.phase())
            .field("scanner", &self.scanner)
            .finish_non_exhaustive()
    }
}

impl Kiosk {
    pub fn new(
        client: PosApiClient,
        session: SessionStore,
        scanner: Option<Scanner>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Kiosk {
            client,
            session,
            scanner,
            notifier,
            route: Route::Index,
            home: HomeState::new(),
            default_tax: TaxRate::default(),
            display: DisplaySettings::default(),
        }
    }

    /// Builds a kiosk from validated configuration.
    pub fn from_config(config: &KioskConfig, notifier: Box<dyn Notifier>) -> ConfigResult<Self> {
        let client = PosApiClient::new(&config.api)?;

        let session = if config.storage.ephemeral {
            debug!("Using in-memory session storage");
            SessionStore::in_memory()
        } else {
            let path = config
                .storage
                .resolved_path()
                .ok_or_else(|| ConfigError::Invalid("no session storage path".into()))?;
            info!(?path, "Using session storage file");
            SessionStore::new(Arc::new(FileStorage::open(path)?))
        };

        let scanner = Scanner::from_settings(&config.scanner);
        info!(device = %scanner.describe(), "Barcode reader configured");

        Ok(Kiosk::new(client, session, Some(scanner), notifier)
            .with_default_tax(config.tax.default_rate()?)
            .with_display(config.display.clone()))
    }

    pub fn with_default_tax(mut self, rate: TaxRate) -> Self {
        self.default_tax = rate;
        self
    }

    pub fn with_display(mut self, display: DisplaySettings) -> Self {
        self.display = display;
        self
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn home(&self) -> &HomeState {
        &self.home
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    pub fn scanner(&self) -> Option<&Scanner> {
        self.scanner.as_ref()
    }

    /// The current screen as text.
    pub fn render(&self) -> String {
        match self.route {
            Route::Index => ui::render_loading(),
            Route::Welcome => ui::render_welcome(),
            Route::Home => ui::render_home(&self.home, &self.display),
        }
    }

    /// Reports a failed command: a lost session sends the shopper back to
    /// the welcome screen silently, anything else is alerted.
    pub(crate) fn fail(&mut self, err: AppError) -> AppError {
        if err.is_session_expired() {
            self.expire_session();
        } else {
            self.notifier.alert(&err.message);
        }
        err
    }

    /// Access token of the stored session.
    pub(crate) fn token(&self) -> Result<String, AppError> {
        self.session
            .require()
            .map(|session| session.access_token)
            .map_err(AppError::from)
    }
}
