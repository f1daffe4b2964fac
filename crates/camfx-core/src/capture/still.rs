//! Single still image file as a camera.

use super::{Camera, CaptureError};
use crate::snapshot::{mime_for_path, Snapshot};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads one image file each time a frame is requested.
///
/// Until the file exists the camera reports `NotReady`, so a frame written
/// later by another tool is picked up on the next capture.
#[derive(Debug, Clone)]
pub struct StillCamera {
    path: PathBuf,
}

impl StillCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Camera for StillCamera {
    fn snapshot(&mut self) -> Result<Snapshot, CaptureError> {
        read_frame(&self.path)
    }
}

/// Reads and encodes one frame file.
pub(super) fn read_frame(path: &Path) -> Result<Snapshot, CaptureError> {
    let mime = mime_for_path(path).ok_or_else(|| CaptureError::Unsupported(path.to_path_buf()))?;
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(CaptureError::NotReady),
        Err(source) => {
            return Err(CaptureError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    // A zero-length file is a frame still being written.
    if bytes.is_empty() {
        return Err(CaptureError::NotReady);
    }
    Ok(Snapshot::from_image_bytes(mime, &bytes))
}
