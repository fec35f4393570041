//! Data source capability consumed by the feed view-model.

mod mock;

pub use mock::MockRepository;

use thiserror::Error;

use crate::model::FeedItem;

/// Failure reported by a repository.
///
/// All repository failures are treated uniformly and only carry a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RepositoryError {
    pub message: String,
}

impl RepositoryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Source of feed items.
///
/// Implementations bound their own latency: the view-model has no timeout
/// or cancellation and blocks on each call.
pub trait FeedRepository: Send + Sync {
    /// Fetch up to `limit` items starting at `offset`, most recent first.
    fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<FeedItem>, RepositoryError>;

    /// Register a like. Returns `Ok(false)` when no item has this id.
    fn like_item(&self, id: &str) -> Result<bool, RepositoryError>;

    /// Persist a new item. Returns `Ok(false)` when the item was not stored.
    fn add_item(&self, item: FeedItem) -> Result<bool, RepositoryError>;
}
