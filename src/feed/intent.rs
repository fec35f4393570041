use crate::model::FeedItem;
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum FeedIntent {
    /// Initial fetch started. Clears the previous error.
    InitialLoadStarted,
    /// Next-page fetch started. Keeps the previous error.
    MoreLoadStarted,
    /// Pagination reset ahead of a refresh.
    Reset,
    /// First page arrived; replaces the items.
    InitialPageLoaded { items: Vec<FeedItem> },
    /// Next page arrived; appended after the current items.
    MorePageLoaded { items: Vec<FeedItem> },
    LoadFailed { message: String },
    /// Fetch settled, successfully or not.
    LoadFinished,
    /// Repository accepted a like for this id.
    ItemLiked { id: String },
    /// Repository stored a new item.
    ItemCreated { item: FeedItem },
}

impl Intent for FeedIntent {}
