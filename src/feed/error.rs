use thiserror::Error;

use crate::model::ModelError;
use crate::repository::RepositoryError;

/// Errors returned by feed operations.
///
/// Operations never panic on these: a failed fetch is also recorded in
/// `FeedState::error` for observers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid item: {0}")]
    InvalidItem(#[from] ModelError),

    /// The repository has no item with this id.
    #[error("Item '{id}' not found")]
    NotFound { id: String },

    /// The repository answered without storing anything.
    #[error("Repository rejected {operation}")]
    Rejected { operation: &'static str },
}
