//! Line-oriented barcode reader.
//!
//! USB and serial readers in keyboard-wedge mode emit one code per line.
//! The reader is either a device/file path (`/dev/ttyACM0`,
//! `/dev/input/by-id/...-event-kbd` behind a line discipline, a FIFO) or
//! `-` for standard input.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::camera::{Camera, Frame, FrameSource, MediaStream, Track};
use crate::error::{ScanError, ScanResult};

/// Where reader lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSource {
    Stdin,
    Path(PathBuf),
}

impl DeviceSource {
    /// `-` is standard input; anything else is a path.
    pub fn parse(device: &str) -> Self {
        match device.trim() {
            "" | "-" => DeviceSource::Stdin,
            path => DeviceSource::Path(PathBuf::from(path)),
        }
    }
}

impl std::fmt::Display for DeviceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceSource::Stdin => f.write_str("stdin"),
            DeviceSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// [`Camera`] over a line reader.
#[derive(Debug)]
pub struct LineReaderCamera {
    source: DeviceSource,
    opened: u32,
}

impl LineReaderCamera {
    pub fn new(source: DeviceSource) -> Self {
        LineReaderCamera { source, opened: 0 }
    }

    pub fn source(&self) -> &DeviceSource {
        &self.source
    }
}

impl Camera for LineReaderCamera {
    fn open(&mut self) -> ScanResult<MediaStream> {
        let reader = match &self.source {
            DeviceSource::Stdin => LineReader::Stdin,
            DeviceSource::Path(path) => {
                let file = File::open(path)
                    .map_err(|e| ScanError::DeviceUnavailable(format!("{}: {}", path.display(), e)))?;
                LineReader::File(BufReader::new(file))
            }
        };

        self.opened += 1;
        let live = Arc::new(AtomicBool::new(true));
        let track = ReaderTrack {
            id: format!("{}#{}", self.source, self.opened),
            live: live.clone(),
        };
        info!(track = %track.id, "Barcode reader opened");

        let tracks: Vec<Box<dyn Track>> = vec![Box::new(track)];
        Ok(MediaStream::new(tracks, Box::new(LineFrames { reader, live })))
    }

    fn describe(&self) -> String {
        format!("barcode reader ({})", self.source)
    }

    fn shares_console(&self) -> bool {
        self.source == DeviceSource::Stdin
    }
}

struct ReaderTrack {
    id: String,
    live: Arc<AtomicBool>,
}

impl Track for ReaderTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn stop(&mut self) {
        if self.live.swap(false, Ordering::SeqCst) {
            debug!(track = %self.id, "Barcode reader track stopped");
        }
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

/// Standard input is read unbuffered on our side so lines the console
/// reads afterwards are not swallowed.
enum LineReader {
    Stdin,
    File(BufReader<File>),
}

impl LineReader {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> std::io::Result<usize> {
        match self {
            LineReader::Stdin => {
                let mut line = String::new();
                let read = std::io::stdin().read_line(&mut line)?;
                buf.extend_from_slice(line.as_bytes());
                Ok(read)
            }
            LineReader::File(reader) => reader.read_until(b'\n', buf),
        }
    }
}

struct LineFrames {
    reader: LineReader,
    live: Arc<AtomicBool>,
}

impl FrameSource for LineFrames {
    fn next_frame(&mut self) -> ScanResult<Option<Frame>> {
        if !self.live.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let mut line = Vec::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 || !self.live.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(Frame::new(line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert_eq!(DeviceSource::parse("-"), DeviceSource::Stdin);
        assert_eq!(DeviceSource::parse(""), DeviceSource::Stdin);
        assert_eq!(
            DeviceSource::parse("/dev/ttyACM0"),
            DeviceSource::Path(PathBuf::from("/dev/ttyACM0"))
        );
    }

    #[test]
    fn test_only_stdin_shares_console() {
        assert!(LineReaderCamera::new(DeviceSource::Stdin).shares_console());
        assert!(!LineReaderCamera::new(DeviceSource::parse("/dev/ttyACM0")).shares_console());
    }

    #[test]
    fn test_missing_device_is_unavailable() {
        let mut camera = LineReaderCamera::new(DeviceSource::Path("/nonexistent/reader".into()));
        assert!(matches!(camera.open(), Err(ScanError::DeviceUnavailable(_))));
    }

    #[test]
    fn test_reads_lines_until_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reader");
        std::fs::write(&path, "4901234567894\n96385074\n").unwrap();

        let mut camera = LineReaderCamera::new(DeviceSource::Path(path));
        let mut stream = camera.open().unwrap();
        assert_eq!(stream.live_tracks(), 1);

        let frame = stream.next_frame().unwrap().unwrap();
        assert_eq!(frame.data(), b"4901234567894\n");

        stream.stop_all();
        assert_eq!(stream.live_tracks(), 0);
        assert!(stream.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_end_of_file_ends_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reader");
        std::fs::write(&path, "").unwrap();

        let mut stream = LineReaderCamera::new(DeviceSource::Path(path)).open().unwrap();
        assert!(stream.next_frame().unwrap().is_none());
    }
}
