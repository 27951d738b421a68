//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod crud;
pub mod media;

pub use crud::{CrudError, CrudRepository, PrimaryKeyOf, is_unique_violation};
pub use media::MediaRepository;
