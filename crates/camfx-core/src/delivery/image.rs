//! Per-image URL builder.

use super::{DeliveryClient, DeliveryError, Transformation};

/// A hosted image plus an ordered list of transformations.
#[derive(Debug, Clone)]
pub struct ImageUrl<'a> {
    client: &'a DeliveryClient,
    public_id: String,
    transformations: Vec<Transformation>,
}

impl<'a> ImageUrl<'a> {
    pub(super) fn new(client: &'a DeliveryClient, public_id: &str) -> Self {
        Self {
            client,
            public_id: public_id.trim_matches('/').to_string(),
            transformations: Vec::new(),
        }
    }

    pub fn resize(self, width: u32, height: u32) -> Self {
        self.transform(Transformation::Resize { width, height })
    }

    pub fn overlay(self, asset: &str) -> Self {
        self.transform(Transformation::overlay(asset))
    }

    pub fn art_filter(self, name: &str) -> Self {
        self.transform(Transformation::art_filter(name))
    }

    /// Append a transformation; applied after everything added before it.
    pub fn transform(mut self, t: Transformation) -> Self {
        self.transformations.push(t);
        self
    }

    pub fn transformations(&self) -> &[Transformation] {
        &self.transformations
    }

    /// Fully qualified delivery URL.
    pub fn to_url(&self) -> Result<String, DeliveryError> {
        if self.public_id.is_empty() {
            return Err(DeliveryError::EmptyPublicId);
        }
        if self.public_id.split('/').any(|s| s == "." || s == "..") {
            return Err(DeliveryError::InvalidPublicId(self.public_id.clone()));
        }
        let mut url = self.client.base().clone();
        {
            // Base URLs are validated as hierarchical in DeliveryClient::with_host.
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DeliveryError::InvalidHost(self.client.base().to_string()))?;
            segments.clear();
            segments.extend([self.client.cloud_name(), "image", "upload"]);
            for t in &self.transformations {
                segments.extend(t.components());
            }
            // Folder separators in public ids stay path separators.
            segments.extend(self.public_id.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url.into())
    }
}
