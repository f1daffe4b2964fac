//! `camfx catalog` – list overlays and filters.

use anyhow::Result;
use camfx_core::catalog::Catalog;
use camfx_core::config::CamfxConfig;

pub fn run_catalog(cfg: &CamfxConfig) -> Result<()> {
    print_catalog(&cfg.catalog()?);
    Ok(())
}

pub(crate) fn print_catalog(catalog: &Catalog) {
    println!("Overlays ({}):", catalog.overlays.len());
    for o in &catalog.overlays {
        println!("  {o}");
    }
    println!("Filters ({}):", catalog.filters.len());
    for f in &catalog.filters {
        println!("  {f}");
    }
}
