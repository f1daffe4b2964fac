//! Overlay and art-filter catalog.
//!
//! The selectable overlays and filters are data: a built-in default table,
//! optionally replaced by a TOML file (`overlays = [...]`, `filters = [...]`).

mod defaults;

pub use defaults::{DEFAULT_FILTERS, DEFAULT_OVERLAYS};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("reading catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("empty {kind} name in catalog")]
    EmptyName { kind: &'static str },
    #[error("invalid {kind} name {name:?}: must not contain whitespace, '/' or ','")]
    InvalidName { kind: &'static str, name: String },
    #[error("duplicate {kind} {name:?} in catalog")]
    Duplicate { kind: &'static str, name: String },
}

/// Named overlay assets and art filters offered once an image is hosted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub overlays: Vec<String>,
    #[serde(default)]
    pub filters: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            overlays: DEFAULT_OVERLAYS.iter().map(|s| s.to_string()).collect(),
            filters: DEFAULT_FILTERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Catalog {
    /// Parse and validate a catalog from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml(&text)?;
        tracing::debug!(
            path = %path.display(),
            overlays = catalog.overlays.len(),
            filters = catalog.filters.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Built-in catalog, or the file at `path` when given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn contains_overlay(&self, name: &str) -> bool {
        self.overlays.iter().any(|o| o == name)
    }

    pub fn contains_filter(&self, name: &str) -> bool {
        self.filters.iter().any(|f| f == name)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        // Overlay asset ids use ':' as their folder separator. '/' would split
        // the URL path and ',' would split the transformation component.
        check_names("overlay", &self.overlays, invalid_name)?;
        check_names("filter", &self.filters, invalid_name)
    }
}

fn invalid_name(name: &str) -> bool {
    name.contains(char::is_whitespace) || name.contains('/') || name.contains(',')
}

fn check_names(
    kind: &'static str,
    names: &[String],
    invalid: impl Fn(&str) -> bool,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(CatalogError::EmptyName { kind });
        }
        if invalid(name) {
            return Err(CatalogError::InvalidName {
                kind,
                name: name.clone(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(CatalogError::Duplicate {
                kind,
                name: name.clone(),
            });
        }
    }
    Ok(())
}
