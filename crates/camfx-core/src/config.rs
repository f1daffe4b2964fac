use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::capture::Constraints;
use crate::catalog::Catalog;
use crate::delivery::{DeliveryClient, DEFAULT_DELIVERY_HOST};
use crate::upload::CurlUploader;

/// Environment variable that overrides `cloud_name`.
pub const CLOUD_NAME_ENV: &str = "CAMFX_CLOUD_NAME";

/// Upload request timeouts (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub connect_timeout_secs: u64,
    /// Whole request, including sending the snapshot.
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

/// Global configuration loaded from `~/.config/camfx/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamfxConfig {
    /// Hosting account name used in delivery URLs. May be left empty and set via `CAMFX_CLOUD_NAME`.
    #[serde(default)]
    pub cloud_name: String,
    /// Use https delivery URLs.
    #[serde(default = "default_secure")]
    pub secure: bool,
    #[serde(default = "default_delivery_host")]
    pub delivery_host: String,
    /// Endpoint accepting `{"image": "<data uri>"}` POSTs.
    pub upload_endpoint: String,
    #[serde(default)]
    pub upload: Option<UploadConfig>,
    pub camera_width: u32,
    pub camera_height: u32,
    /// Optional overlay/filter catalog; the built-in one is used when missing.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_secure() -> bool {
    true
}

fn default_delivery_host() -> String {
    DEFAULT_DELIVERY_HOST.to_string()
}

impl Default for CamfxConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            secure: true,
            delivery_host: default_delivery_host(),
            upload_endpoint: "http://127.0.0.1:3000/api/upload".to_string(),
            upload: None,
            camera_width: 720,
            camera_height: 720,
            catalog_path: None,
        }
    }
}

impl CamfxConfig {
    /// Apply environment overrides (`CAMFX_CLOUD_NAME`).
    pub fn apply_env(&mut self) {
        self.apply_cloud_name_override(std::env::var(CLOUD_NAME_ENV).ok());
    }

    fn apply_cloud_name_override(&mut self, value: Option<String>) {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            self.cloud_name = v.trim().to_string();
        }
    }

    pub fn delivery_client(&self) -> Result<DeliveryClient> {
        DeliveryClient::with_host(&self.cloud_name, self.secure, &self.delivery_host).with_context(
            || format!("cloud_name must be set in config.toml or via {}", CLOUD_NAME_ENV),
        )
    }

    pub fn uploader(&self) -> CurlUploader {
        let upload = self.upload.clone().unwrap_or_default();
        CurlUploader::new(&self.upload_endpoint).with_timeouts(
            Duration::from_secs(upload.connect_timeout_secs),
            Duration::from_secs(upload.timeout_secs),
        )
    }

    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::load_or_default(self.catalog_path.as_deref()).context("loading catalog")
    }

    pub fn constraints(&self) -> Constraints {
        Constraints {
            width: self.camera_width,
            height: self.camera_height,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("camfx")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// Environment overrides are applied to the result.
pub fn load_or_init() -> Result<CamfxConfig> {
    let path = config_path()?;
    let mut cfg = if !path.exists() {
        let default_cfg = CamfxConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        default_cfg
    } else {
        let data = fs::read_to_string(&path)?;
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?
    };
    cfg.apply_env();
    Ok(cfg)
}
