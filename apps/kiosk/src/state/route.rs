//! Screens of the kiosk.
//!
//! ```text
//!   "/" ──redirect──► "/welcome" ──start_shopping──► "/home"
//!                          ▲                             │
//!                          └──── logout / 401 / no session
//! ```

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Root; only ever shows "Loading..." before redirecting.
    #[default]
    Index,
    Welcome,
    Home,
}

impl Route {
    pub const fn path(&self) -> &'static str {
        match self {
            Route::Index => "/",
            Route::Welcome => "/welcome",
            Route::Home => "/home",
        }
    }

    /// Where this route immediately forwards to, if anywhere.
    pub const fn redirect(&self) -> Option<Route> {
        match self {
            Route::Index => Some(Route::Welcome),
            _ => None,
        }
    }

    /// Whether the route needs stored credentials.
    pub const fn requires_session(&self) -> bool {
        matches!(self, Route::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('/') {
            "" => Ok(Route::Index),
            "/welcome" | "welcome" => Ok(Route::Welcome),
            "/home" | "home" => Ok(Route::Home),
            other => Err(format!("Unknown screen: '{other}'")),
        }
    }
}
