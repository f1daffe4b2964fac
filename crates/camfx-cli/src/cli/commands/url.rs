//! `camfx url <public_id>` – display URL for an already hosted image.

use anyhow::Result;
use camfx_core::config::CamfxConfig;
use camfx_core::controller::Controller;
use camfx_core::upload::HostedImage;

pub fn run_url(
    cfg: &CamfxConfig,
    public_id: &str,
    overlay: Option<&str>,
    filter: Option<&str>,
) -> Result<()> {
    let client = cfg.delivery_client()?;
    let mut controller = Controller::with_hosted(cfg.catalog()?, HostedImage::new(public_id));
    if let Some(o) = overlay {
        controller.select_overlay(o)?;
    }
    if let Some(f) = filter {
        controller.select_filter(f)?;
    }
    if let Some(url) = controller.display_url(&client)? {
        println!("{url}");
    }
    Ok(())
}
