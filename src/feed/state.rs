use crate::model::FeedItem;
use crate::mvi::UiState;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which kind of fetch is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// First page, replacing the current items.
    Initial,
    /// Next page, appended after the current items.
    More,
}

/// Conceptual phase of the feed, derived from the state fields.
///
/// `error` is orthogonal and may be set in any idle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    IdleEmpty,
    LoadingInitial,
    IdlePopulated,
    LoadingMore,
    IdleExhausted,
}

/// Snapshot of the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    /// Most recent first within the initial page; later pages are appended.
    pub items: Vec<FeedItem>,
    /// Fetch in flight, if any.
    pub loading: Option<LoadKind>,
    /// Description of the last fetch failure. Cleared when an initial load starts.
    pub error: Option<String>,
    /// Pages loaded since the last reset.
    pub current_page: usize,
    pub page_size: usize,
    /// False once a fetch returned fewer than `page_size` items.
    pub has_more: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl UiState for FeedState {}

impl FeedState {
    /// Empty state for the given page size.
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            loading: None,
            error: None,
            current_page: 0,
            page_size,
            has_more: true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn phase(&self) -> FeedPhase {
        match self.loading {
            Some(LoadKind::Initial) => FeedPhase::LoadingInitial,
            Some(LoadKind::More) => FeedPhase::LoadingMore,
            None if !self.has_more => FeedPhase::IdleExhausted,
            None if self.items.is_empty() => FeedPhase::IdleEmpty,
            None => FeedPhase::IdlePopulated,
        }
    }

    /// First item with the given id.
    pub fn find(&self, id: &str) -> Option<&FeedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Offset of the next page to fetch.
    pub fn next_offset(&self) -> usize {
        self.current_page * self.page_size
    }
}
