//! Delivery URL building for hosted images.
//!
//! URLs have the shape
//! `{scheme}://{host}/{cloud_name}/image/upload/{t1}/.../{public_id}`,
//! with transformations emitted in the order they were added. The client is
//! constructed explicitly and passed to whoever needs URLs.

mod image;
mod transform;

pub use image::ImageUrl;
pub use transform::{FacePlacement, Transformation};

use url::Url;

pub const DEFAULT_DELIVERY_HOST: &str = "res.cloudinary.com";

/// Side of the square preview thumbnails.
pub const THUMBNAIL_SIZE: u32 = 200;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("cloud name is empty")]
    EmptyCloudName,
    #[error("public id is empty")]
    EmptyPublicId,
    #[error("public id {0:?} contains a '.' or '..' segment")]
    InvalidPublicId(String),
    #[error("invalid delivery host {0:?}")]
    InvalidHost(String),
}

/// Builds delivery URLs for one cloud.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    cloud_name: String,
    base: Url,
}

impl DeliveryClient {
    /// Client for `cloud_name` on the default host.
    pub fn new(cloud_name: &str, secure: bool) -> Result<Self, DeliveryError> {
        Self::with_host(cloud_name, secure, DEFAULT_DELIVERY_HOST)
    }

    pub fn with_host(cloud_name: &str, secure: bool, host: &str) -> Result<Self, DeliveryError> {
        let cloud_name = cloud_name.trim();
        if cloud_name.is_empty() {
            return Err(DeliveryError::EmptyCloudName);
        }
        let host = host.trim().trim_end_matches('/');
        let scheme = if secure { "https" } else { "http" };
        let base = Url::parse(&format!("{}://{}/", scheme, host))
            .ok()
            .filter(|u| u.host_str().is_some() && u.path() == "/")
            .ok_or_else(|| DeliveryError::InvalidHost(host.to_string()))?;
        Ok(Self {
            cloud_name: cloud_name.to_string(),
            base,
        })
    }

    pub fn cloud_name(&self) -> &str {
        &self.cloud_name
    }

    pub fn is_secure(&self) -> bool {
        self.base.scheme() == "https"
    }

    /// Start a URL for `public_id`.
    pub fn image(&self, public_id: &str) -> ImageUrl<'_> {
        ImageUrl::new(self, public_id)
    }

    pub(crate) fn base(&self) -> &Url {
        &self.base
    }
}
