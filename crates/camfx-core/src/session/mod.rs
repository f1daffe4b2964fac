//! Event-driven session: a controller plus background uploads.
//!
//! `capture` returns as soon as the frame is stored; the upload runs on
//! tokio's blocking pool and its result is applied when the caller awaits
//! `next_completion` (or polls `drain_completions`). Must be used from
//! within a tokio runtime.

use std::sync::Arc;
use tokio::task::JoinSet;

use crate::capture::{Camera, CaptureError};
use crate::controller::{Controller, Preview, SelectError, UploadOutcome, UploadTicket, View};
use crate::delivery::{DeliveryClient, DeliveryError};
use crate::upload::{HostedImage, UploadError, Uploader};

struct Completion {
    generation: u64,
    result: Result<HostedImage, UploadError>,
}

pub struct Session {
    controller: Controller,
    client: DeliveryClient,
    uploader: Arc<dyn Uploader>,
    uploads: JoinSet<Completion>,
}

impl Session {
    pub fn new(controller: Controller, client: DeliveryClient, uploader: Arc<dyn Uploader>) -> Self {
        Self {
            controller,
            client,
            uploader,
            uploads: JoinSet::new(),
        }
    }

    /// Capture a frame and start its upload. Returns the generation of the
    /// new snapshot, or `None` if the camera had no frame yet.
    pub fn capture(&mut self, camera: &mut dyn Camera) -> Result<Option<u64>, CaptureError> {
        let Some(ticket) = self.controller.capture(camera)? else {
            return Ok(None);
        };
        let generation = ticket.generation;
        self.spawn_upload(ticket);
        Ok(Some(generation))
    }

    fn spawn_upload(&mut self, ticket: UploadTicket) {
        let uploader = Arc::clone(&self.uploader);
        tracing::debug!(generation = ticket.generation, "upload issued");
        self.uploads.spawn_blocking(move || Completion {
            generation: ticket.generation,
            result: uploader.upload(&ticket.snapshot),
        });
    }

    /// Wait for the next upload to finish and apply it.
    /// Returns `None` when no uploads are in flight.
    pub async fn next_completion(&mut self) -> Option<UploadOutcome> {
        while let Some(joined) = self.uploads.join_next().await {
            match joined {
                Ok(c) => return Some(self.controller.complete_upload(c.generation, c.result)),
                Err(e) => tracing::error!("upload task failed: {}", e),
            }
        }
        None
    }

    /// Apply every upload that has already finished, without waiting.
    pub fn drain_completions(&mut self) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::new();
        while let Some(joined) = self.uploads.try_join_next() {
            match joined {
                Ok(c) => outcomes.push(self.controller.complete_upload(c.generation, c.result)),
                Err(e) => tracing::error!("upload task failed: {}", e),
            }
        }
        outcomes
    }

    /// Wait until the upload for the current generation has been applied or
    /// has failed, skipping stale results. `None` if nothing is pending.
    pub async fn settle(&mut self) -> Option<UploadOutcome> {
        while let Some(outcome) = self.next_completion().await {
            if !matches!(outcome, UploadOutcome::Stale { .. }) {
                return Some(outcome);
            }
        }
        None
    }

    pub fn pending_uploads(&self) -> usize {
        self.uploads.len()
    }

    /// Back to live capture. In-flight uploads keep running; their results are dropped.
    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn select_overlay(&mut self, name: &str) -> Result<(), SelectError> {
        self.controller.select_overlay(name)
    }

    pub fn select_filter(&mut self, name: &str) -> Result<(), SelectError> {
        self.controller.select_filter(name)
    }

    pub fn clear_overlay(&mut self) {
        self.controller.clear_overlay();
    }

    pub fn clear_filter(&mut self) {
        self.controller.clear_filter();
    }

    pub fn view(&self) -> Result<View, DeliveryError> {
        self.controller.view(&self.client)
    }

    pub fn display_url(&self) -> Result<Option<String>, DeliveryError> {
        self.controller.display_url(&self.client)
    }

    pub fn overlay_previews(&self) -> Result<Vec<Preview>, DeliveryError> {
        self.controller.overlay_previews(&self.client)
    }

    pub fn filter_previews(&self) -> Result<Vec<Preview>, DeliveryError> {
        self.controller.filter_previews(&self.client)
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn client(&self) -> &DeliveryClient {
        &self.client
    }
}
