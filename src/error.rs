use thiserror::Error;

use crate::storage::StorageError;

/// Custom error types for the movie catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The storage backend failed to read or write the catalog
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Rating outside the accepted range
    #[error("Invalid rating {0}: ratings must be between 0 and 10")]
    InvalidRating(f64),

    /// Title that is empty or only whitespace
    #[error("Movie title must not be empty")]
    EmptyTitle,
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
