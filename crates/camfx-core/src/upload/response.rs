//! Upload endpoint request/response bodies.

use serde::{Deserialize, Serialize};

use super::UploadError;

#[derive(Debug, Serialize)]
pub(crate) struct UploadRequest<'a> {
    pub image: &'a str,
}

/// Hosted image record returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedImage {
    /// Identifier used to build delivery URLs.
    pub public_id: String,
    #[serde(default)]
    pub secure_url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
}

impl HostedImage {
    pub fn new(public_id: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            secure_url: None,
            width: None,
            height: None,
            format: None,
        }
    }
}

/// Parse a response body; `public_id` must be present and non-empty.
pub(crate) fn parse_response(body: &[u8]) -> Result<HostedImage, UploadError> {
    let image: HostedImage =
        serde_json::from_slice(body).map_err(|e| UploadError::InvalidResponse(e.to_string()))?;
    if image.public_id.trim().is_empty() {
        return Err(UploadError::InvalidResponse("empty public_id".to_string()));
    }
    Ok(image)
}
