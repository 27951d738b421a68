//! Offset/limit pagination for list endpoints.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Query parameters for offset-paginated lists (`?skip=&limit=`).
///
/// Values are signed so that out-of-range input reaches [`PageRequest::validate`]
/// and is reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of records to skip.
    #[serde(default = "default_skip")]
    pub skip: i64,
    /// Maximum number of records to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_skip() -> i64 {
    0
}

fn default_limit() -> i64 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: default_skip(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Smallest accepted `skip`.
    pub const MIN_SKIP: i64 = 0;
    /// Smallest accepted `limit`.
    pub const MIN_LIMIT: i64 = 1;

    /// Creates a page request.
    #[must_use]
    pub const fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }

    /// Checks the bounds and returns `(offset, limit)` for database queries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] when `skip < 0` or `limit < 1`.
    pub fn validate(&self) -> Result<(u64, u64), AppError> {
        if self.skip < Self::MIN_SKIP {
            return Err(AppError::InvalidInput(format!(
                "skip must be greater than or equal to {}",
                Self::MIN_SKIP
            )));
        }
        if self.limit < Self::MIN_LIMIT {
            return Err(AppError::InvalidInput(format!(
                "limit must be greater than or equal to {}",
                Self::MIN_LIMIT
            )));
        }
        // Both values are non-negative here.
        Ok((self.skip.unsigned_abs(), self.limit.unsigned_abs()))
    }
}
