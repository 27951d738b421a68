//! Object storage for uploaded media using Apache OpenDAL.
//!
//! Supported backends:
//! - S3-compatible: MinIO, AWS S3 (uploads go through a presigned PUT URL)
//! - Local filesystem (development only)
//! - In-process memory (tests)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! │                   (Unified Storage API)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.presign_write("key", ttl) + HTTP PUT │ op.write("key", data)  │
//! │ op.delete("key")                        │ op.stat("key")         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod error;
mod service;

pub use error::StorageError;
pub use memeshare_shared::config::{StorageConfig, StorageProvider};
pub use service::{PresignedUrl, StorageService};
