//! Media types and data structures.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Media record domain model.
///
/// Serialized as `{id, meme_url, meme_description}`; the field names are part
/// of the HTTP contract of both services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Store-assigned identifier.
    pub id: i32,
    /// Public URL of the uploaded object.
    #[serde(rename = "meme_url")]
    pub url: String,
    /// Unique description.
    #[serde(rename = "meme_description")]
    pub description: String,
}

/// Input for creating a media record.
#[derive(Debug, Clone)]
pub struct NewMedia {
    /// Public URL of the uploaded object.
    pub url: String,
    /// Unique description.
    pub description: String,
}

/// Partial update of a media record. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPatch {
    /// New description.
    #[serde(
        rename = "meme_description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl MediaPatch {
    /// Returns true when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
    }
}

/// An uploaded file plus its description.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    /// File name as sent by the client.
    pub file_name: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// Raw file bytes.
    pub data: Bytes,
    /// Description for the new record.
    pub description: String,
}
