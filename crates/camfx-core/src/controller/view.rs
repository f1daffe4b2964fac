//! Derived display: the hosted image URL and thumbnail previews.

use super::Controller;
use crate::delivery::{DeliveryClient, DeliveryError, THUMBNAIL_SIZE};

/// What the booth shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// No hosted image: show the camera feed.
    LiveCapture,
    /// Hosted image with the current selections applied.
    Hosted { url: String },
}

/// Thumbnail of the hosted image with a single catalog entry applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub name: String,
    pub url: String,
    /// This entry is the current selection.
    pub active: bool,
}

impl Controller {
    /// Delivery URL for the hosted image, overlay first, then filter.
    /// `None` while there is no hosted image.
    pub fn display_url(&self, client: &DeliveryClient) -> Result<Option<String>, DeliveryError> {
        let Some(hosted) = &self.hosted else {
            return Ok(None);
        };
        let mut image = client.image(&hosted.public_id);
        if let Some(overlay) = &self.overlay {
            image = image.overlay(overlay);
        }
        if let Some(filter) = &self.filter {
            image = image.art_filter(filter);
        }
        image.to_url().map(Some)
    }

    pub fn view(&self, client: &DeliveryClient) -> Result<View, DeliveryError> {
        Ok(match self.display_url(client)? {
            Some(url) => View::Hosted { url },
            None => View::LiveCapture,
        })
    }

    /// One thumbnail per catalog overlay. Empty without a hosted image.
    pub fn overlay_previews(&self, client: &DeliveryClient) -> Result<Vec<Preview>, DeliveryError> {
        let Some(hosted) = &self.hosted else {
            return Ok(Vec::new());
        };
        self.catalog
            .overlays
            .iter()
            .map(|name| -> Result<Preview, DeliveryError> {
                let url = client
                    .image(&hosted.public_id)
                    .resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE)
                    .overlay(name)
                    .to_url()?;
                Ok(Preview {
                    name: name.clone(),
                    url,
                    active: self.overlay.as_deref() == Some(name.as_str()),
                })
            })
            .collect()
    }

    /// One thumbnail per catalog filter. Empty without a hosted image.
    pub fn filter_previews(&self, client: &DeliveryClient) -> Result<Vec<Preview>, DeliveryError> {
        let Some(hosted) = &self.hosted else {
            return Ok(Vec::new());
        };
        self.catalog
            .filters
            .iter()
            .map(|name| -> Result<Preview, DeliveryError> {
                let url = client
                    .image(&hosted.public_id)
                    .resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE)
                    .art_filter(name)
                    .to_url()?;
                Ok(Preview {
                    name: name.clone(),
                    url,
                    active: self.filter.as_deref() == Some(name.as_str()),
                })
            })
            .collect()
    }
}
