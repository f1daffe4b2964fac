//! JSON POST to the upload endpoint via libcurl.

use super::response::{parse_response, UploadRequest};
use super::{HostedImage, UploadError, Uploader};
use crate::snapshot::Snapshot;
use std::time::Duration;

/// Longest error body kept in `UploadError::Http`.
const MAX_ERROR_BODY: usize = 512;

/// Uploads snapshots with a single POST per call (no retries).
#[derive(Debug, Clone)]
pub struct CurlUploader {
    endpoint: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlUploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Uploader for CurlUploader {
    fn upload(&self, snapshot: &Snapshot) -> Result<HostedImage, UploadError> {
        let body = serde_json::to_vec(&UploadRequest {
            image: snapshot.as_str(),
        })
        .map_err(|e| UploadError::InvalidResponse(format!("encoding request: {}", e)))?;

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.endpoint)?;
        easy.post(true)?;
        easy.post_fields_copy(&body)?;
        easy.follow_location(true)?;
        easy.max_redirections(5)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        list.append("Content-Type: application/json")?;
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        tracing::debug!(endpoint = %self.endpoint, bytes = body.len(), "uploading snapshot");

        let mut response = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            let mut body = String::from_utf8_lossy(&response).into_owned();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(UploadError::Http { status, body });
        }

        let image = parse_response(&response)?;
        tracing::debug!(public_id = %image.public_id, "upload accepted");
        Ok(image)
    }
}
