//! Capture-and-preview controller.
//!
//! Owns the booth state: the captured snapshot, the hosted image reference
//! returned by the upload, and the selected overlay and filter. Display mode
//! is live capture until a hosted image exists.
//!
//! Every capture that stores a frame and every reset bumps a generation
//! counter. Uploads carry the generation they were issued for, and
//! completions for any other generation are dropped, so a slow upload can
//! never resurrect a photo the user already discarded or replaced.

mod view;

pub use view::{Preview, View};

use crate::capture::{Camera, CaptureError};
use crate::catalog::Catalog;
use crate::snapshot::Snapshot;
use crate::upload::{HostedImage, UploadError};

/// Upload the caller must issue for a freshly captured snapshot.
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub generation: u64,
    pub snapshot: Snapshot,
}

/// What `complete_upload` did with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Stored as the hosted image; display switched to the hosted image.
    Applied(HostedImage),
    /// Upload failed; display stays in live capture. Message kept in `last_error`.
    Failed(String),
    /// Result belonged to an older generation and was discarded.
    Stale { generation: u64, current: u64 },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("no hosted image yet; capture a photo first")]
    NoHostedImage,
    #[error("unknown overlay {0:?}")]
    UnknownOverlay(String),
    #[error("unknown filter {0:?}")]
    UnknownFilter(String),
}

#[derive(Debug, Clone)]
pub struct Controller {
    catalog: Catalog,
    generation: u64,
    snapshot: Option<Snapshot>,
    hosted: Option<HostedImage>,
    overlay: Option<String>,
    filter: Option<String>,
    last_error: Option<String>,
}

impl Controller {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            generation: 0,
            snapshot: None,
            hosted: None,
            overlay: None,
            filter: None,
            last_error: None,
        }
    }

    /// Controller already showing an image uploaded earlier.
    pub fn with_hosted(catalog: Catalog, image: HostedImage) -> Self {
        let mut c = Self::new(catalog);
        c.generation = 1;
        c.hosted = Some(image);
        c
    }

    /// Take a frame from `camera`.
    ///
    /// Returns `Ok(None)` without touching state if the camera has no frame
    /// yet. Otherwise replaces the snapshot, drops the previous hosted image
    /// and selections, and returns the upload to issue.
    pub fn capture(&mut self, camera: &mut dyn Camera) -> Result<Option<UploadTicket>, CaptureError> {
        let snapshot = match camera.snapshot() {
            Ok(s) => s,
            Err(CaptureError::NotReady) => {
                tracing::debug!("capture ignored: camera not ready");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        Ok(Some(self.set_snapshot(snapshot)))
    }

    /// Store a snapshot directly (e.g. one produced outside a `Camera`).
    pub fn set_snapshot(&mut self, snapshot: Snapshot) -> UploadTicket {
        self.clear_image();
        self.generation += 1;
        tracing::info!(generation = self.generation, %snapshot, "captured");
        self.snapshot = Some(snapshot.clone());
        UploadTicket {
            generation: self.generation,
            snapshot,
        }
    }

    /// Back to live capture: everything cleared, pending uploads orphaned.
    pub fn reset(&mut self) {
        self.clear_image();
        self.generation += 1;
        tracing::info!(generation = self.generation, "reset");
    }

    fn clear_image(&mut self) {
        self.snapshot = None;
        self.hosted = None;
        self.overlay = None;
        self.filter = None;
        self.last_error = None;
    }

    /// Apply an upload result issued for `generation`.
    pub fn complete_upload(
        &mut self,
        generation: u64,
        result: Result<HostedImage, UploadError>,
    ) -> UploadOutcome {
        if generation != self.generation || self.snapshot.is_none() {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale upload result"
            );
            return UploadOutcome::Stale {
                generation,
                current: self.generation,
            };
        }
        match result {
            Ok(image) => {
                tracing::info!(generation, public_id = %image.public_id, "upload complete");
                self.hosted = Some(image.clone());
                self.last_error = None;
                UploadOutcome::Applied(image)
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "upload failed");
                let msg = e.to_string();
                self.last_error = Some(msg.clone());
                UploadOutcome::Failed(msg)
            }
        }
    }

    pub fn select_overlay(&mut self, name: &str) -> Result<(), SelectError> {
        if self.hosted.is_none() {
            return Err(SelectError::NoHostedImage);
        }
        if !self.catalog.contains_overlay(name) {
            return Err(SelectError::UnknownOverlay(name.to_string()));
        }
        tracing::debug!(overlay = name, "overlay selected");
        self.overlay = Some(name.to_string());
        Ok(())
    }

    pub fn select_filter(&mut self, name: &str) -> Result<(), SelectError> {
        if self.hosted.is_none() {
            return Err(SelectError::NoHostedImage);
        }
        if !self.catalog.contains_filter(name) {
            return Err(SelectError::UnknownFilter(name.to_string()));
        }
        tracing::debug!(filter = name, "filter selected");
        self.filter = Some(name.to_string());
        Ok(())
    }

    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn hosted(&self) -> Option<&HostedImage> {
        self.hosted.as_ref()
    }

    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Failure message of the current generation's upload, if it failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Snapshot taken, upload neither finished nor failed.
    pub fn is_uploading(&self) -> bool {
        self.snapshot.is_some() && self.hosted.is_none() && self.last_error.is_none()
    }
}

#[cfg(test)]
mod tests;
