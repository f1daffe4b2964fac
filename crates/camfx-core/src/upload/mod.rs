//! Upload of snapshots to the hosting endpoint.
//!
//! The endpoint takes a JSON body `{"image": "<data uri>"}` and answers with
//! the hosted image record, of which only `public_id` is required.

mod curl_uploader;
mod response;

pub use curl_uploader::CurlUploader;
pub use response::HostedImage;

use crate::snapshot::Snapshot;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Transport failure (connect, timeout, TLS, ...).
    #[error("upload request failed: {0}")]
    Curl(#[from] curl::Error),
    /// Endpoint answered with a non-2xx status.
    #[error("upload endpoint returned HTTP {status}")]
    Http { status: u32, body: String },
    /// Body was not JSON or lacked `public_id`.
    #[error("invalid upload response: {0}")]
    InvalidResponse(String),
}

impl UploadError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UploadError::Curl(e) if e.is_operation_timedout())
    }
}

/// Sends one snapshot and returns the hosted image reference.
///
/// Implementations block; async callers run them on the blocking pool.
pub trait Uploader: Send + Sync {
    fn upload(&self, snapshot: &Snapshot) -> Result<HostedImage, UploadError>;
}

impl<F> Uploader for F
where
    F: Fn(&Snapshot) -> Result<HostedImage, UploadError> + Send + Sync,
{
    fn upload(&self, snapshot: &Snapshot) -> Result<HostedImage, UploadError> {
        self(snapshot)
    }
}
