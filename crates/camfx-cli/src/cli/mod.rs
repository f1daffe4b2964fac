//! CLI for camfx.

mod booth_command;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use camfx_core::config;
use std::path::PathBuf;

use commands::{
    run_booth, run_catalog, run_completions, run_manpage, run_previews, run_shoot, run_url,
};

/// Top-level CLI for camfx.
#[derive(Debug, Parser)]
#[command(name = "camfx")]
#[command(about = "camfx: capture a photo, upload it, and preview hosted overlays and art filters", long_about = None)]
pub struct Cli {
    /// Cloud name for delivery URLs (overrides config.toml and CAMFX_CLOUD_NAME).
    #[arg(long, global = true, value_name = "NAME")]
    pub cloud_name: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the display URL for an already hosted image.
    Url {
        /// Hosted image public id.
        public_id: String,
        /// Overlay asset to layer over detected faces.
        #[arg(long)]
        overlay: Option<String>,
        /// Art filter to apply after the overlay.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Print thumbnail URLs for every overlay and filter.
    Previews {
        /// Hosted image public id.
        public_id: String,
    },

    /// List the available overlays and filters.
    Catalog,

    /// Capture one frame, upload it, and print the display URL.
    Shoot {
        /// Image file, or a frame directory with --spool.
        source: PathBuf,
        /// Treat SOURCE as a spool directory and use its newest frame.
        #[arg(long)]
        spool: bool,
        #[arg(long)]
        overlay: Option<String>,
        #[arg(long)]
        filter: Option<String>,
    },

    /// Interactive booth: commands on stdin, uploads in the background.
    Booth {
        /// Image file, or a frame directory with --spool.
        source: PathBuf,
        #[arg(long)]
        spool: bool,
    },

    /// Generate shell completions.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Render the man page to stdout.
    Manpage,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // These need no config.
        match &cli.command {
            CliCommand::Completions { shell } => return run_completions(*shell),
            CliCommand::Manpage => return run_manpage(),
            _ => {}
        }

        let mut cfg = config::load_or_init()?;
        if let Some(name) = cli.cloud_name {
            cfg.cloud_name = name;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Url {
                public_id,
                overlay,
                filter,
            } => run_url(&cfg, &public_id, overlay.as_deref(), filter.as_deref())?,
            CliCommand::Previews { public_id } => run_previews(&cfg, &public_id)?,
            CliCommand::Catalog => run_catalog(&cfg)?,
            CliCommand::Shoot {
                source,
                spool,
                overlay,
                filter,
            } => {
                run_shoot(&cfg, &source, spool, overlay.as_deref(), filter.as_deref()).await?
            }
            CliCommand::Booth { source, spool } => run_booth(&cfg, &source, spool).await?,
            CliCommand::Completions { .. } | CliCommand::Manpage => unreachable!(),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
