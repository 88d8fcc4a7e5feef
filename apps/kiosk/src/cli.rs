//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::state::KioskConfig;

#[derive(Parser, Debug)]
#[command(name = "scango-kiosk")]
#[command(author, version, about = "ScanGo self-checkout kiosk", long_about = None)]
pub struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Store API endpoint, e.g. http://localhost:8000
    #[arg(long, global = true)]
    pub api_endpoint: Option<String>,

    /// Barcode reader device: a file path, or "-" for standard input
    #[arg(long, global = true)]
    pub scanner: Option<String>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the kiosk console (default)
    Run,

    /// Write the effective configuration to a file
    InitConfig {
        /// Destination (defaults to the platform config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration
    ShowConfig,
}

impl Args {
    /// Flags win over the file and the environment.
    pub fn apply(&self, config: &mut KioskConfig) {
        if let Some(endpoint) = &self.api_endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(device) = &self.scanner {
            config.scanner.device = device.clone();
        }
        if self.ephemeral {
            config.storage.ephemeral = true;
        }
    }
}
