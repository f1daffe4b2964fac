//! Spool directory camera: the newest frame a capture daemon has written.

use super::still::read_frame;
use super::{Camera, CaptureError};
use crate::snapshot::{mime_for_path, Snapshot};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Watches a directory of frames (e.g. written by `fswebcam --loop`).
/// The most recently modified supported image is the current frame.
#[derive(Debug, Clone)]
pub struct SpoolCamera {
    dir: PathBuf,
}

impl SpoolCamera {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the newest frame, if any.
    pub fn latest_frame(&self) -> Result<Option<PathBuf>, CaptureError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(e) => e,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CaptureError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for entry in entries.flatten() {
            let path = entry.path();
            if mime_for_path(&path).is_none() {
                continue;
            }
            let Ok(meta) = entry.metadata() else { continue };
            if !meta.is_file() || meta.len() == 0 {
                continue;
            }
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            let newer = match &newest {
                None => true,
                // Ties broken by name so frame-0001, frame-0002 order is stable.
                Some((t, p)) => modified > *t || (modified == *t && path > *p),
            };
            if newer {
                newest = Some((modified, path));
            }
        }
        Ok(newest.map(|(_, p)| p))
    }
}

impl Camera for SpoolCamera {
    fn snapshot(&mut self) -> Result<Snapshot, CaptureError> {
        match self.latest_frame()? {
            Some(path) => {
                tracing::trace!(frame = %path.display(), "spool frame");
                read_frame(&path)
            }
            None => Err(CaptureError::NotReady),
        }
    }
}
