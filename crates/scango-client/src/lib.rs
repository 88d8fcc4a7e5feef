//! # scango-client: Store API Client for ScanGo POS
//!
//! Everything the kiosk says to the outside world goes through this crate:
//! the four REST endpoints of the store API and the small key/value store
//! that keeps the session credentials between runs.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store API                                       │
//! │                                                                         │
//! │  POST /auth/start                  → { access_token, user_id }          │
//! │  GET  /tax/{id}          (Bearer)  → { tax_rate }                       │
//! │  GET  /products?code=    (Bearer)  → { prd_id, code, name, price }      │
//! │  POST /purchase          (Bearer)  → { trd_id, ttl_amt_ex_tax,          │
//! │       { items[], emp_cd }              tax_amt, total_amt }             │
//! │                                                                         │
//! │  401 from any Bearer call ──► ClientError::Unauthorized                 │
//! │  (the kiosk clears the session and returns to the welcome screen)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries, no caching: one request per shopper action.

pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod storage;

pub use client::PosApiClient;
pub use config::ApiSettings;
pub use error::{ClientError, ClientResult};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, SessionStore, StorageKey};
