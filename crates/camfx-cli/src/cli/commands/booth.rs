//! `camfx booth <source>` – interactive capture-and-preview loop.
//!
//! Reads commands from stdin while uploads finish in the background; each
//! applied upload switches the view from live capture to the hosted image.

use anyhow::Result;
use camfx_core::capture::Camera;
use camfx_core::config::CamfxConfig;
use camfx_core::controller::{UploadOutcome, View};
use camfx_core::session::Session;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::catalog::print_catalog;
use super::previews::print_previews;
use super::{open_camera, open_session};
use crate::cli::booth_command::{BoothCommand, HELP};

pub async fn run_booth(cfg: &CamfxConfig, source: &Path, spool: bool) -> Result<()> {
    let mut session = open_session(cfg)?;
    let mut camera = open_camera(source, spool);
    let constraints = cfg.constraints();
    println!(
        "camfx booth: source {} ({}x{}); type 'help' for commands",
        source.display(),
        constraints.width,
        constraints.height
    );
    print_view(&session)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<BoothCommand>() {
                    Ok(BoothCommand::Quit) => break,
                    Ok(cmd) => {
                        if let Err(e) = apply(&mut session, camera.as_mut(), cmd) {
                            println!("error: {e:#}");
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            Some(outcome) = session.next_completion(), if session.pending_uploads() > 0 => {
                report(&outcome);
                if !matches!(outcome, UploadOutcome::Stale { .. }) {
                    print_view(&session)?;
                }
            }
        }
    }

    if session.pending_uploads() > 0 {
        tracing::debug!(pending = session.pending_uploads(), "leaving with uploads in flight");
    }
    Ok(())
}

fn apply(session: &mut Session, camera: &mut dyn Camera, cmd: BoothCommand) -> Result<()> {
    match cmd {
        BoothCommand::Capture => match session.capture(camera)? {
            Some(generation) => println!("captured photo #{generation}, uploading..."),
            None => println!("camera not ready yet"),
        },
        BoothCommand::Reset => {
            session.reset();
            print_view(session)?;
        }
        BoothCommand::Overlay(name) => {
            session.select_overlay(&name)?;
            print_view(session)?;
        }
        BoothCommand::Filter(name) => {
            session.select_filter(&name)?;
            print_view(session)?;
        }
        BoothCommand::ClearOverlay => {
            session.clear_overlay();
            print_view(session)?;
        }
        BoothCommand::ClearFilter => {
            session.clear_filter();
            print_view(session)?;
        }
        BoothCommand::Show => print_view(session)?,
        BoothCommand::Previews => {
            if session.controller().hosted().is_none() {
                println!("no hosted photo yet; capture first");
            } else {
                print_previews("Overlays", &session.overlay_previews()?);
                print_previews("Filters", &session.filter_previews()?);
            }
        }
        BoothCommand::Catalog => print_catalog(session.controller().catalog()),
        BoothCommand::Help => println!("{HELP}"),
        BoothCommand::Quit => {}
    }
    Ok(())
}

fn report(outcome: &UploadOutcome) {
    match outcome {
        UploadOutcome::Applied(image) => println!("uploaded as {}", image.public_id),
        UploadOutcome::Failed(msg) => println!("upload failed: {msg} (capture to retry)"),
        UploadOutcome::Stale { generation, .. } => {
            tracing::debug!(generation, "ignored result of discarded photo")
        }
    }
}

fn print_view(session: &Session) -> Result<()> {
    let c = session.controller();
    match session.view()? {
        View::LiveCapture if c.is_uploading() => println!("[live] uploading photo..."),
        View::LiveCapture => println!("[live] camera ready; 'capture' to take a photo"),
        View::Hosted { url } => {
            println!(
                "[photo] overlay={} filter={}",
                c.overlay().unwrap_or("-"),
                c.filter().unwrap_or("-")
            );
            println!("  {url}");
        }
    }
    Ok(())
}
