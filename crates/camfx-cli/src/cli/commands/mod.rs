//! CLI command handlers. Each command is in its own file.

mod booth;
mod catalog;
mod completions;
mod previews;
mod shoot;
mod url;

pub use booth::run_booth;
pub use catalog::run_catalog;
pub use completions::{run_completions, run_manpage};
pub use previews::run_previews;
pub use shoot::run_shoot;
pub use url::run_url;

use anyhow::Result;
use camfx_core::capture::{Camera, SpoolCamera, StillCamera};
use camfx_core::config::CamfxConfig;
use camfx_core::controller::Controller;
use camfx_core::session::Session;
use std::path::Path;
use std::sync::Arc;

/// Camera for `source`: a spool directory or a single still file.
pub(crate) fn open_camera(source: &Path, spool: bool) -> Box<dyn Camera> {
    if spool {
        Box::new(SpoolCamera::new(source))
    } else {
        Box::new(StillCamera::new(source))
    }
}

/// Session wired from config: catalog, delivery client and curl uploader.
pub(crate) fn open_session(cfg: &CamfxConfig) -> Result<Session> {
    let controller = Controller::new(cfg.catalog()?);
    let client = cfg.delivery_client()?;
    let uploader = cfg.uploader();
    tracing::debug!(endpoint = uploader.endpoint(), "upload endpoint");
    Ok(Session::new(controller, client, Arc::new(uploader)))
}
