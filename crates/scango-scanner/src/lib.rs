//! # scango-scanner: Barcode Reader for ScanGo POS
//!
//! The kiosk's "camera": something that, once opened, produces frames, and
//! a decoder that turns frames into product codes.
//!
//! ## Pieces
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         scango-scanner                                  │
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────────┐   ┌────────────────────────┐  │
//! │  │ Camera       │   │ Decoder          │   │ Scanner                │  │
//! │  │ (trait)      │   │ (trait)          │   │                        │  │
//! │  │              │   │                  │   │ open / next_code /     │  │
//! │  │ LineReader-  │   │ Symbology-       │   │ close, released on     │  │
//! │  │ Camera       │   │ Decoder          │   │ Drop                   │  │
//! │  └──────────────┘   └──────────────────┘   └────────────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! Closing the scanner (explicitly or by dropping it) stops every track of
//! the open stream and resets the decoder.

pub mod camera;
pub mod config;
pub mod decoder;
pub mod device;
pub mod error;
pub mod scanner;

pub use camera::{Camera, Frame, FrameSource, MediaStream, Track};
pub use config::ScannerSettings;
pub use decoder::{Decoder, SymbologyDecoder};
pub use device::{DeviceSource, LineReaderCamera};
pub use error::{DecodeError, ScanError, ScanResult};
pub use scanner::Scanner;
