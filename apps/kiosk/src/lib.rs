//! # ScanGo Kiosk Library
//!
//! Self-checkout kiosk for the ScanGo store API. The shopper starts a
//! session, scans or types product codes, builds a purchase list and pays
//! for it; the kiosk shows tax-inclusive prices as it goes.
//!
//! ## Module Organization
//! ```text
//! scango_kiosk/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Command-line flags
//! ├── kiosk.rs        ◄─── Kiosk: services + screen state
//! ├── repl.rs         ◄─── Console loop
//! ├── ui.rs           ◄─── Screen rendering, alerts
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── route.rs    ◄─── "/", "/welcome", "/home"
//! │   ├── home.rs     ◄─── Home screen state
//! │   └── config.rs   ◄─── KioskConfig (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command index
//! │   ├── session.rs  ◄─── Navigation, auth guard, logout
//! │   ├── welcome.rs  ◄─── Start shopping
//! │   ├── scan.rs     ◄─── Barcode reader
//! │   ├── product.rs  ◄─── Product lookup, add to list
//! │   ├── cart.rs     ◄─── Purchase list edits, total
//! │   └── purchase.rs ◄─── Purchase, confirmation
//! └── error.rs        ◄─── AppError, ConfigError
//! ```
//!
//! ## Screen Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   "/" ──redirect──► "/welcome" ──start_shopping──► "/home"              │
//! │                          ▲                            │                 │
//! │                          │      logout / any 401      │                 │
//! │                          └────────────────────────────┘                 │
//! │                                                                         │
//! │   "/home" without accessToken + userId ──guard──► "/welcome"            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod kiosk;
pub mod repl;
pub mod state;
pub mod ui;

pub use error::{AppError, ConfigError, ErrorCode};
pub use kiosk::Kiosk;
pub use state::{HomeState, KioskConfig, Phase, Route};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Args, Commands};
use ui::ConsoleNotifier;

/// Runs the kiosk.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse flags                                                         │
/// │  2. Initialize logging (stderr, RUST_LOG)                               │
/// │  3. Load configuration: defaults ─► kiosk.toml ─► SCANGO_* ─► flags     │
/// │  4. Validate                                                            │
/// │  5. Open session storage, build the API client and barcode reader       │
/// │  6. Console loop until "quit" or end of input                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = KioskConfig::load(args.config.clone()).context("loading configuration")?;
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    match args.command {
        Some(Commands::InitConfig { output }) => {
            let path = config.save(output)?;
            println!("Configuration written to {}", path.display());
            return Ok(());
        }
        Some(Commands::ShowConfig) => {
            print!("{}", toml::to_string_pretty(&config)?);
            return Ok(());
        }
        Some(Commands::Run) | None => {}
    }

    info!(endpoint = %config.api.endpoint, "Starting ScanGo kiosk");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let result = runtime.block_on(async {
        let mut kiosk = Kiosk::from_config(&config, Box::new(ConsoleNotifier))?;
        repl::run(&mut kiosk).await
    });
    // An abandoned console or reader read may still be blocked.
    runtime.shutdown_background();
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they do not interleave with the screen.
/// - `RUST_LOG=debug` shows debug messages
/// - `RUST_LOG=scango=trace` traces the scango crates only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,scango=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
