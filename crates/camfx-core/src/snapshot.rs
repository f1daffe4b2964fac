//! Captured frames as `data:` URIs, the payload format the upload endpoint accepts.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::path::Path;

/// Raw captured image data: `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    /// Encodes raw image bytes as a data URI.
    pub fn from_image_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// MIME type from the data URI header.
    pub fn mime(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map(|(mime, _)| mime)
            .unwrap_or_default()
    }

    /// Decodes the base64 payload back into image bytes.
    pub fn decode_payload(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let payload = self.0.split_once(',').map(|(_, p)| p).unwrap_or_default();
        STANDARD.decode(payload)
    }

    /// Length of the encoded URI in bytes (what goes over the wire).
    pub fn encoded_len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Snapshot {
    // Payloads are large; show only the header.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snapshot({}, {} bytes)", self.mime(), self.encoded_len())
    }
}

/// MIME type for a supported image file, by extension.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
