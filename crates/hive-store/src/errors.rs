//! Store error types.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool exhaustion or setup failure.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind ("project", "file", …).
        entity: &'static str,
        /// The missing id.
        id: String,
    },

    /// A stored value failed to parse back into its typed form.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// Invariant violation inside the store itself.
    #[error("internal store error: {0}")]
    Internal(String),
}
