//! `camfx shoot <source>` – capture once, upload, print the display URL.

use anyhow::{bail, Result};
use camfx_core::config::CamfxConfig;
use camfx_core::controller::UploadOutcome;
use std::path::Path;

use super::{open_camera, open_session};

pub async fn run_shoot(
    cfg: &CamfxConfig,
    source: &Path,
    spool: bool,
    overlay: Option<&str>,
    filter: Option<&str>,
) -> Result<()> {
    let mut session = open_session(cfg)?;
    let mut camera = open_camera(source, spool);

    if session.capture(camera.as_mut())?.is_none() {
        bail!("no frame available at {}", source.display());
    }
    eprintln!("Uploading...");

    match session.settle().await {
        Some(UploadOutcome::Applied(image)) => {
            tracing::info!(public_id = %image.public_id, "shoot uploaded");
        }
        Some(UploadOutcome::Failed(msg)) => bail!("upload failed: {msg}"),
        Some(UploadOutcome::Stale { .. }) | None => bail!("upload did not complete"),
    }

    if let Some(o) = overlay {
        session.select_overlay(o)?;
    }
    if let Some(f) = filter {
        session.select_filter(f)?;
    }
    if let Some(url) = session.display_url()? {
        println!("{url}");
    }
    Ok(())
}
