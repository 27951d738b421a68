//! Media orchestration and object storage for Memeshare.
//!
//! This crate contains the storage service's business logic with ZERO web or
//! database dependencies. Persistence is reached through the
//! [`media::MediaRepository`] trait, implemented by the db crate.
//!
//! # Modules
//!
//! - `media` - Media records and the upload-then-persist orchestrator
//! - `storage` - Object storage client (S3-compatible, filesystem, memory)

pub mod media;
pub mod storage;
