//! Capture sources.
//!
//! A `Camera` hands out the current frame as an encoded `Snapshot`, or
//! `CaptureError::NotReady` when it has not produced one yet. The device
//! itself lives outside this crate; the sources here read frames that a
//! camera (or a camera daemon) has written to disk.

mod spool;
mod still;

pub use spool::SpoolCamera;
pub use still::StillCamera;

use crate::snapshot::Snapshot;
use std::path::PathBuf;

/// Requested frame size, passed to sources that can honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub width: u32,
    pub height: u32,
}

impl Constraints {
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            width: 720,
            height: 720,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// No frame available yet (camera still starting up).
    #[error("camera has not produced a frame yet")]
    NotReady,
    #[error("unsupported image format: {}", .0.display())]
    Unsupported(PathBuf),
    #[error("reading frame {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of captured frames.
pub trait Camera {
    /// Current frame, encoded. `CaptureError::NotReady` if none exists yet.
    fn snapshot(&mut self) -> Result<Snapshot, CaptureError>;
}

impl<C: Camera + ?Sized> Camera for Box<C> {
    fn snapshot(&mut self) -> Result<Snapshot, CaptureError> {
        (**self).snapshot()
    }
}
