//! Shared errors, configuration, and pagination types for Memeshare.
//!
//! This crate provides common types used across all other crates:
//! - Offset/limit pagination for list endpoints
//! - Application-wide error types
//! - Configuration management for the storage service and the gateway

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, GatewayConfig};
pub use error::{AppError, AppResult};
