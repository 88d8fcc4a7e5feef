//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────────┐  │
//! │  │    Route     │  │    HomeState     │  │      KioskConfig         │  │
//! │  │              │  │                  │  │                          │  │
//! │  │  /           │  │  camera flags    │  │  [api] [tax] [storage]   │  │
//! │  │  /welcome    │  │  product_info    │  │  [scanner] [display]     │  │
//! │  │  /home       │  │  purchase_list   │  │                          │  │
//! │  │              │  │  modal / receipt │  │  read-only after start   │  │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────────┘  │
//! │                                                                         │
//! │  The kiosk runs on one thread; the `Kiosk` owns all of it directly.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod home;
mod route;

pub use config::{DisplaySettings, KioskConfig, StorageSettings, TaxSettings};
pub use home::{HomeState, Phase, Receipt};
pub use route::Route;
