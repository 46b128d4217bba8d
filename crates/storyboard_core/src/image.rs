//! Inline image references.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use storyboard_error::{StorageError, StorageErrorKind};

/// A generated image, held inline as a `data:` URI.
///
/// # Examples
///
/// ```
/// use storyboard_core::ImageReference;
///
/// let image = ImageReference::from_base64("image/png", "aGVsbG8=");
/// assert_eq!(image.as_str(), "data:image/png;base64,aGVsbG8=");
/// assert_eq!(image.mime_type(), Some("image/png"));
/// assert_eq!(image.decode().unwrap(), b"hello");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    /// Build a reference from a MIME type and base64 payload.
    pub fn from_base64(mime_type: &str, data: &str) -> Self {
        Self(format!("data:{};base64,{}", mime_type, data))
    }

    /// The raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the reference carries nothing.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// MIME type declared by a `data:` URI, if this is one.
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let (header, _) = rest.split_once(',')?;
        header.split(';').next().filter(|mime| !mime.is_empty())
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type() {
            Some("image/jpeg") | Some("image/jpg") => "jpg",
            Some("image/webp") => "webp",
            Some("image/gif") => "gif",
            _ => "png",
        }
    }

    /// Decode the base64 payload into raw image bytes.
    ///
    /// # Errors
    ///
    /// Fails if the reference is not a base64 `data:` URI or the payload
    /// is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, StorageError> {
        let (header, payload) = self
            .0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::InvalidImage(
                    "not a data URI".to_string(),
                ))
            })?;

        if !header.ends_with(";base64") {
            return Err(StorageError::new(StorageErrorKind::InvalidImage(
                "data URI is not base64 encoded".to_string(),
            )));
        }

        STANDARD
            .decode(payload.trim())
            .map_err(|e| StorageError::new(StorageErrorKind::InvalidImage(e.to_string())))
    }
}
