//! Media records and the storage orchestrator.
//!
//! This module provides:
//! - The media record domain model and its wire shape
//! - The repository contract implemented by the db crate
//! - `MediaService`, which composes object upload with metadata persistence

mod error;
mod service;
mod types;

pub use error::MediaError;
pub use service::{MediaRepository, MediaService};
pub use types::{Media, MediaPatch, MediaUpload, NewMedia};
