//! # Camera Commands
//!
//! ```text
//! open_camera ─► Scanning ──scan──► code ─► on_code_detected
//!                   ▲                            │
//!                rescan                  close_camera + search_product
//!                   │
//!            CodeDetected
//!
//! scan_until(cancel): cancel first ─► close_camera, read abandoned
//! close_camera: stop every track, reset the decoder, clear flags + code
//! ```

use std::future::Future;

use scango_core::Product;
use tracing::{debug, info};

use crate::error::{AppError, ErrorCode, MSG_CAMERA_FAILED};
use crate::kiosk::Kiosk;

impl Kiosk {
    /// Opens the reader and starts scanning.
    pub fn open_camera(&mut self) -> Result<(), AppError> {
        self.home.camera_open = true;

        let opened = match self.scanner.as_mut() {
            Some(scanner) => scanner.open().map_err(AppError::from),
            None => Err(AppError::new(ErrorCode::Scanner, MSG_CAMERA_FAILED)),
        };

        match opened {
            Ok(()) => {
                self.home.scanning = true;
                Ok(())
            }
            Err(e) => {
                self.close_camera();
                Err(self.fail(e))
            }
        }
    }

    /// Waits for the reader to deliver a code and handles it.
    ///
    /// Returns the product when the code was found. `Ok(None)` when not
    /// scanning or when the reader went away.
    pub async fn scan(&mut self) -> Result<Option<Product>, AppError> {
        self.scan_until(std::future::pending()).await
    }

    /// [`scan`](Self::scan) that gives up when `cancel` completes first.
    ///
    /// Giving up closes the camera, which stops the reader's tracks even
    /// though its blocking read is still outstanding.
    pub async fn scan_until<F>(&mut self, cancel: F) -> Result<Option<Product>, AppError>
    where
        F: Future<Output = ()>,
    {
        if !self.home.camera_open || !self.home.scanning {
            return Ok(None);
        }
        let Some(scanner) = self.scanner.as_mut() else {
            return Ok(None);
        };

        let read = tokio::select! {
            read = scanner.read_next() => Some(read),
            () = cancel => None,
        };

        match read {
            Some(Ok(Some(code))) => self.on_code_detected(&code).await.map(Some),
            Some(Ok(None)) => {
                debug!("Reader delivered no code");
                self.close_camera();
                Ok(None)
            }
            Some(Err(e)) => {
                self.close_camera();
                Err(self.fail(e.into()))
            }
            None => {
                info!("Scan cancelled");
                self.close_camera();
                Ok(None)
            }
        }
    }

    /// A code came off the reader: stop scanning, close the camera and
    /// look the product up.
    pub async fn on_code_detected(&mut self, code: &str) -> Result<Product, AppError> {
        info!(code, "Barcode scanned");
        self.home.scanned_code = code.to_string();
        self.home.search_code = code.to_string();
        self.home.scanning = false;
        if let Some(scanner) = self.scanner.as_mut() {
            scanner.stop_scanning();
        }

        self.close_camera();
        self.search_product(code).await
    }

    /// Forget the scanned code and scan again.
    pub fn rescan(&mut self) -> Result<(), AppError> {
        self.home.scanned_code.clear();

        if !self.scanner.as_ref().is_some_and(|s| s.is_open()) {
            return self.open_camera();
        }
        let restarted = match self.scanner.as_mut() {
            Some(scanner) => scanner.start_scanning().map_err(AppError::from),
            None => Err(AppError::new(ErrorCode::Scanner, MSG_CAMERA_FAILED)),
        };

        match restarted {
            Ok(()) => {
                self.home.scanning = true;
                Ok(())
            }
            Err(e) => {
                self.close_camera();
                Err(self.fail(e))
            }
        }
    }

    /// Releases the reader and clears the camera flags.
    pub fn close_camera(&mut self) {
        if let Some(scanner) = self.scanner.as_mut() {
            scanner.close();
        }
        self.home.reset_camera();
    }
}
