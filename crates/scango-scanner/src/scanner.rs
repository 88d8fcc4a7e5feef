//! # Scanner Lifecycle
//!
//! ```text
//!            open()                 start_scanning()
//!  Closed ───────────► Open ◄──────────────────────► Scanning
//!    ▲                  │        stop_scanning()        │
//!    │     close()      │                               │
//!    └──────────────────┴───────────────────────────────┘
//!          stops every track, resets the decoder
//!          (also run on Drop)
//! ```
//!
//! Decode failures never leave [`Scanner::next_code`] or
//! [`Scanner::read_next`]; they keep reading until a frame decodes or the
//! stream ends. `read_next` can be abandoned mid-read and the scanner still
//! closes.

use tracing::{debug, info, warn};

use crate::camera::{Camera, MediaStream};
use crate::config::ScannerSettings;
use crate::decoder::{Decoder, SymbologyDecoder};
use crate::device::{DeviceSource, LineReaderCamera};
use crate::error::{ScanError, ScanResult};

/// Owns the camera, the decoder and (while open) the stream.
pub struct Scanner {
    camera: Box<dyn Camera>,
    decoder: Box<dyn Decoder>,
    stream: Option<MediaStream>,
    scanning: bool,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("camera", &self.camera.describe())
            .field("open", &self.stream.is_some())
            .field("scanning", &self.scanning)
            .finish()
    }
}

impl Scanner {
    pub fn new(camera: Box<dyn Camera>, decoder: Box<dyn Decoder>) -> Self {
        Scanner {
            camera,
            decoder,
            stream: None,
            scanning: false,
        }
    }

    /// Line reader plus symbology decoder, as configured.
    pub fn from_settings(settings: &ScannerSettings) -> Self {
        Scanner::new(
            Box::new(LineReaderCamera::new(DeviceSource::parse(&settings.device))),
            Box::new(SymbologyDecoder::new(settings.strict_symbology)),
        )
    }

    pub fn describe(&self) -> String {
        self.camera.describe()
    }

    /// See [`Camera::shares_console`].
    pub fn shares_console(&self) -> bool {
        self.camera.shares_console()
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Opens the device and starts scanning. Opening an open scanner only
    /// restarts scanning.
    pub fn open(&mut self) -> ScanResult<()> {
        if self.stream.is_none() {
            let stream = self.camera.open()?;
            info!(device = %self.camera.describe(), "Scanner opened");
            self.stream = Some(stream);
        }
        self.start_scanning()
    }

    /// Resumes decoding on an open stream.
    pub fn start_scanning(&mut self) -> ScanResult<()> {
        if self.stream.is_none() {
            return Err(ScanError::NotOpen);
        }
        self.decoder.reset();
        self.scanning = true;
        Ok(())
    }

    pub fn stop_scanning(&mut self) {
        self.scanning = false;
    }

    /// Blocks until a frame decodes. `Ok(None)` when not scanning or when
    /// the stream ended.
    pub fn next_code(&mut self) -> ScanResult<Option<String>> {
        let stream = self.stream.as_mut().ok_or(ScanError::NotOpen)?;

        while self.scanning {
            let Some(frame) = stream.next_frame()? else {
                debug!("Scanner stream ended");
                return Ok(None);
            };

            match self.decoder.decode(&frame) {
                Ok(code) => {
                    debug!(code = %code, "Barcode detected");
                    return Ok(Some(code));
                }
                Err(e) => debug!(reason = %e, "Frame skipped"),
            }
        }

        Ok(None)
    }

    /// [`next_code`](Self::next_code) with each device read on the blocking
    /// pool.
    ///
    /// Only the frame source goes to the blocking task; the tracks stay with
    /// the scanner. Dropping this future mid-read therefore leaves the device
    /// stoppable: [`close`](Self::close) still stops every track, and the
    /// abandoned read finishes in the background with its frame source.
    /// Until the scanner is closed and reopened, further reads fail with
    /// [`ScanError::Busy`].
    pub async fn read_next(&mut self) -> ScanResult<Option<String>> {
        while self.scanning {
            let stream = self.stream.as_mut().ok_or(ScanError::NotOpen)?;
            let mut frames = stream.take_frames().ok_or(ScanError::Busy)?;

            let task = tokio::task::spawn_blocking(move || {
                let read = frames.next_frame();
                (frames, read)
            });
            let (frames, read) = task.await.map_err(|e| {
                warn!(error = %e, "Scanner read task failed");
                ScanError::Task(e.to_string())
            })?;
            if let Some(stream) = self.stream.as_mut() {
                stream.restore_frames(frames);
            }

            let Some(frame) = read? else {
                debug!("Scanner stream ended");
                return Ok(None);
            };
            match self.decoder.decode(&frame) {
                Ok(code) => {
                    debug!(code = %code, "Barcode detected");
                    return Ok(Some(code));
                }
                Err(e) => debug!(reason = %e, "Frame skipped"),
            }
        }

        Ok(None)
    }

    /// Stops every track, drops the stream and resets the decoder.
    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_all();
            info!("Scanner closed");
        }
        self.decoder.reset();
        self.scanning = false;
    }
}

impl Drop for Scanner {
    fn drop(&mut self) {
        self.close();
    }
}
