//! # Camera Seam
//!
//! A [`Camera`] hands out a [`MediaStream`]: the live tracks that hold the
//! device plus the frames coming off it. Whoever owns the stream owns the
//! device; [`MediaStream::stop_all`] releases every track.
//!
//! ```text
//! ┌──────────┐  open()  ┌─────────────────────────────────────┐
//! │  Camera  │ ───────► │ MediaStream                         │
//! └──────────┘          │   tracks: [Track, ...]   stop_all() │
//!                       │   frames: FrameSource    next()     │
//!                       └─────────────────────────────────────┘
//! ```

use crate::error::{ScanError, ScanResult};

/// One raw read from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
}

impl Frame {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Frame { data: data.into() }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A live handle on the device.
pub trait Track: Send {
    /// Identifier for logs.
    fn id(&self) -> &str;

    /// Stops the track. Stopping twice is harmless.
    fn stop(&mut self);

    fn is_live(&self) -> bool;
}

/// Source of frames for an open stream.
pub trait FrameSource: Send {
    /// Blocks for the next frame. `Ok(None)` means the stream ended.
    fn next_frame(&mut self) -> ScanResult<Option<Frame>>;
}

/// Opens the device.
pub trait Camera: Send {
    fn open(&mut self) -> ScanResult<MediaStream>;

    /// Human-readable description of the device.
    fn describe(&self) -> String;

    /// Whether the device reads the same input as the console.
    fn shares_console(&self) -> bool {
        false
    }
}

/// An open device.
///
/// The frame source can be lent out for a blocking read while the tracks
/// stay here, so the device can be stopped while a read is pending.
pub struct MediaStream {
    tracks: Vec<Box<dyn Track>>,
    frames: Option<Box<dyn FrameSource>>,
}

impl std::fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStream")
            .field("tracks", &self.tracks.iter().map(|t| t.id().to_string()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl MediaStream {
    pub fn new(tracks: Vec<Box<dyn Track>>, frames: Box<dyn FrameSource>) -> Self {
        MediaStream {
            tracks,
            frames: Some(frames),
        }
    }

    pub fn next_frame(&mut self) -> ScanResult<Option<Frame>> {
        self.frames.as_mut().ok_or(ScanError::Busy)?.next_frame()
    }

    /// Lends the frame source out. `None` while it is already lent.
    pub fn take_frames(&mut self) -> Option<Box<dyn FrameSource>> {
        self.frames.take()
    }

    pub fn restore_frames(&mut self, frames: Box<dyn FrameSource>) {
        self.frames = Some(frames);
    }

    /// Number of tracks still live.
    pub fn live_tracks(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_live()).count()
    }

    /// Stops every track.
    pub fn stop_all(&mut self) {
        for track in &mut self.tracks {
            track.stop();
        }
    }
}
