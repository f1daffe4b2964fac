//! Line commands understood by `camfx booth`.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoothCommand {
    Capture,
    Reset,
    Overlay(String),
    Filter(String),
    ClearOverlay,
    ClearFilter,
    Show,
    Previews,
    Catalog,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoothCommandError {
    Empty,
    MissingName(&'static str),
    Unknown(String),
}

impl fmt::Display for ParseBoothCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBoothCommandError::Empty => write!(f, "empty command"),
            ParseBoothCommandError::MissingName(cmd) => write!(f, "usage: {} <name>", cmd),
            ParseBoothCommandError::Unknown(cmd) => {
                write!(f, "unknown command {:?}; type 'help'", cmd)
            }
        }
    }
}

impl std::error::Error for ParseBoothCommandError {}

pub const HELP: &str = "\
commands:
  capture | c          take a photo and upload it
  reset | r            discard the photo, back to live capture
  overlay <name>       layer an overlay over faces
  filter <name>        apply an art filter
  clear-overlay        remove the overlay
  clear-filter         remove the filter
  show                 print the current view
  previews             thumbnail URLs for all overlays and filters
  catalog              list overlays and filters
  help                 this text
  quit | q             leave the booth";

impl FromStr for BoothCommand {
    type Err = ParseBoothCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().ok_or(ParseBoothCommandError::Empty)?;
        let arg = parts.next();
        let named = |kind: &'static str, f: fn(String) -> BoothCommand| {
            arg.map(|a| f(a.to_string()))
                .ok_or(ParseBoothCommandError::MissingName(kind))
        };
        match cmd.to_ascii_lowercase().as_str() {
            "capture" | "c" => Ok(BoothCommand::Capture),
            "reset" | "r" => Ok(BoothCommand::Reset),
            "overlay" | "o" => named("overlay", BoothCommand::Overlay),
            "filter" | "f" => named("filter", BoothCommand::Filter),
            "clear-overlay" => Ok(BoothCommand::ClearOverlay),
            "clear-filter" => Ok(BoothCommand::ClearFilter),
            "show" | "s" => Ok(BoothCommand::Show),
            "previews" | "p" => Ok(BoothCommand::Previews),
            "catalog" => Ok(BoothCommand::Catalog),
            "help" | "h" | "?" => Ok(BoothCommand::Help),
            "quit" | "q" | "exit" => Ok(BoothCommand::Quit),
            _ => Err(ParseBoothCommandError::Unknown(cmd.to_string())),
        }
    }
}
