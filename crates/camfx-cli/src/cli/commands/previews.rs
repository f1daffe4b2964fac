//! `camfx previews <public_id>` – thumbnail URLs for every catalog entry.

use anyhow::Result;
use camfx_core::config::CamfxConfig;
use camfx_core::controller::{Controller, Preview};
use camfx_core::upload::HostedImage;

pub fn run_previews(cfg: &CamfxConfig, public_id: &str) -> Result<()> {
    let client = cfg.delivery_client()?;
    let controller = Controller::with_hosted(cfg.catalog()?, HostedImage::new(public_id));
    print_previews("Overlays", &controller.overlay_previews(&client)?);
    print_previews("Filters", &controller.filter_previews(&client)?);
    Ok(())
}

pub(crate) fn print_previews(title: &str, previews: &[Preview]) {
    println!("{title}:");
    if previews.is_empty() {
        println!("  (none)");
        return;
    }
    let width = previews.iter().map(|p| p.name.len()).max().unwrap_or(0);
    for p in previews {
        let marker = if p.active { '*' } else { ' ' };
        println!("{} {:<width$}  {}", marker, p.name, p.url, width = width);
    }
}
