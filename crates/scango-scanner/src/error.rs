//! Scanner errors.
//!
//! [`ScanError`] is about the device (it could not be opened, it is not
//! open, a read failed). [`DecodeError`] is about a single frame and never
//! leaves the scanner: the read loop logs it and moves on.

use thiserror::Error;

/// Result type alias for scanner operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Device-level failures.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The reader could not be opened.
    #[error("Scanner unavailable: {0}")]
    DeviceUnavailable(String),

    /// An operation needs an open stream.
    #[error("Scanner is not open")]
    NotOpen,

    /// The frame source is still held by an earlier read.
    #[error("Scanner read already in progress")]
    Busy,

    /// Reading from the device failed.
    #[error("Scanner read failed: {0}")]
    Io(String),

    /// The blocking read task did not finish.
    #[error("Scanner task failed: {0}")]
    Task(String),
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::Io(err.to_string())
    }
}

/// Why a frame produced no code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Nothing readable in the frame.
    #[error("empty frame")]
    Empty,

    /// Bytes that are not printable ASCII.
    #[error("frame contains unreadable characters")]
    Unreadable,

    /// An EAN/UPC code whose check digit does not match.
    #[error("check digit mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// Strict mode only accepts EAN-13, EAN-8 and UPC-A.
    #[error("unsupported symbology ({len} characters)")]
    Unsupported { len: usize },

    /// Same code as the previous read since the last reset.
    #[error("duplicate read")]
    Duplicate,
}
