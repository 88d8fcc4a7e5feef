//! # Barcode Decoding
//!
//! [`SymbologyDecoder`] turns one reader line into a product code.
//!
//! ## Decode Steps
//! ```text
//! raw frame ─► strip CR/LF ─► strip AIM id (]E0, ]C1, ...) ─► printable?
//!                                                                │
//!            ┌───────────────────────────────────────────────────┘
//!            ▼
//!   8 / 12 / 13 digits? ── yes ─► verify GS1 check digit
//!            │ no
//!            ▼
//!   strict? ── yes ─► Unsupported
//!            │ no
//!            ▼
//!   accept as-is (Code 128, Code 39, in-store codes)
//! ```
//!
//! Repeated reads of the same code are reported as
//! [`DecodeError::Duplicate`] until [`Decoder::reset`] is called, since
//! hand-held readers often fire twice per trigger.

use tracing::trace;

use crate::camera::Frame;
use crate::error::DecodeError;

/// Turns frames into codes.
pub trait Decoder: Send {
    fn decode(&mut self, frame: &Frame) -> Result<String, DecodeError>;

    /// Forgets any state carried between frames.
    fn reset(&mut self);
}

/// Decoder for keyboard-wedge style readers.
#[derive(Debug, Default)]
pub struct SymbologyDecoder {
    strict: bool,
    last: Option<String>,
}

impl SymbologyDecoder {
    pub fn new(strict: bool) -> Self {
        SymbologyDecoder { strict, last: None }
    }
}

impl Decoder for SymbologyDecoder {
    fn decode(&mut self, frame: &Frame) -> Result<String, DecodeError> {
        let text = std::str::from_utf8(frame.data()).map_err(|_| DecodeError::Unreadable)?;
        let code = strip_symbology_id(text.trim_end_matches(['\r', '\n']).trim());

        if code.is_empty() {
            return Err(DecodeError::Empty);
        }
        if !code.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
            return Err(DecodeError::Unreadable);
        }

        if is_gtin_length(code.len()) && code.bytes().all(|b| b.is_ascii_digit()) {
            verify_check_digit(code)?;
        } else if self.strict {
            return Err(DecodeError::Unsupported { len: code.len() });
        }

        if self.last.as_deref() == Some(code) {
            return Err(DecodeError::Duplicate);
        }

        trace!(code, "Decoded frame");
        self.last = Some(code.to_string());
        Ok(code.to_string())
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

/// Removes a leading AIM symbology identifier such as `]E0`.
fn strip_symbology_id(code: &str) -> &str {
    let bytes = code.as_bytes();
    if bytes.len() > 3 && bytes[0] == b']' && bytes[1].is_ascii_alphabetic() && bytes[2].is_ascii_alphanumeric() {
        &code[3..]
    } else {
        code
    }
}

fn is_gtin_length(len: usize) -> bool {
    matches!(len, 8 | 12 | 13)
}

/// GS1 mod-10 check digit of the payload (all digits but the last).
pub fn gtin_check_digit(payload: &str) -> Option<u8> {
    let mut sum = 0u32;
    // Weights alternate 3,1,... starting from the digit next to the check digit.
    for (i, c) in payload.chars().rev().enumerate() {
        let digit = c.to_digit(10)?;
        sum += if i % 2 == 0 { digit * 3 } else { digit };
    }
    Some(((10 - sum % 10) % 10) as u8)
}

fn verify_check_digit(code: &str) -> Result<(), DecodeError> {
    let (payload, check) = code.split_at(code.len() - 1);
    let actual = check
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or(DecodeError::Unreadable)? as u8;
    let expected = gtin_check_digit(payload).ok_or(DecodeError::Unreadable)?;

    if expected == actual {
        Ok(())
    } else {
        Err(DecodeError::ChecksumMismatch { expected, actual })
    }
}
