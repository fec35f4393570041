//! Feed view-model: drives the repository and broadcasts state changes.

use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::config::{Config, ConfigError};
use crate::feed::error::FeedError;
use crate::feed::intent::FeedIntent;
use crate::feed::reducer::FeedReducer;
use crate::feed::state::{FeedPhase, FeedState, LoadKind};
use crate::model::{validate_media, Author, FeedItem, ItemKind};
use crate::mvi::Reducer;
use crate::observer::{Broadcaster, Observer};
use crate::repository::{FeedRepository, RepositoryError};

/// Why a paging operation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another fetch is in flight.
    AlreadyLoading,
    /// The last page was short; `refresh` starts over.
    Exhausted,
}

/// Result of a paging operation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Loaded { fetched: usize, has_more: bool },
    /// Nothing was fetched and nothing was broadcast.
    Skipped(SkipReason),
}

/// Owner of a `FeedState`.
///
/// Every operation runs to completion on the calling thread. The state lock
/// is never held across a repository call or a broadcast, so observers may
/// read `state()` or call operations from inside `on_change`; loads started
/// while another load is in flight are skipped.
pub struct FeedViewModel {
    repository: Arc<dyn FeedRepository>,
    state: Mutex<FeedState>,
    broadcaster: Broadcaster,
    viewer: Arc<Author>,
}

impl FeedViewModel {
    pub fn new(repository: Arc<dyn FeedRepository>, page_size: NonZeroUsize) -> Self {
        Self {
            repository,
            state: Mutex::new(FeedState::new(page_size.get())),
            broadcaster: Broadcaster::new(),
            viewer: Arc::new(Config::default().viewer.to_author()),
        }
    }

    /// Build from configuration: page size and viewer identity.
    pub fn from_config(repository: Arc<dyn FeedRepository>, config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let page_size = NonZeroUsize::new(config.feed.page_size).ok_or_else(|| {
            ConfigError::ValidationError {
                message: "feed.page_size must be positive".to_string(),
            }
        })?;
        Ok(Self::new(repository, page_size).with_viewer(config.viewer.to_author()))
    }

    /// Author attached to items created through `create_item`.
    pub fn with_viewer(mut self, viewer: Author) -> Self {
        self.viewer = Arc::new(viewer);
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FeedState {
        self.state.lock().clone()
    }

    pub fn phase(&self) -> FeedPhase {
        self.state.lock().phase()
    }

    pub fn page_size(&self) -> usize {
        self.state.lock().page_size
    }

    pub fn viewer(&self) -> &Author {
        &self.viewer
    }

    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> bool {
        self.broadcaster.subscribe(observer)
    }

    pub fn unsubscribe(&self, observer: &Arc<dyn Observer>) -> bool {
        self.broadcaster.unsubscribe(observer)
    }

    /// Fetch the first page, replacing the current items.
    ///
    /// Broadcasts once when the fetch starts and once when it settles,
    /// whatever the outcome.
    pub fn load_initial(&self) -> Result<PageOutcome, FeedError> {
        self.start_initial(false)
    }

    /// Fetch the next page and append it.
    ///
    /// Skipped without broadcasting when the feed is exhausted or loading.
    pub fn load_more(&self) -> Result<PageOutcome, FeedError> {
        let (limit, offset) = {
            let mut state = self.state.lock();
            if state.is_loading() {
                return Ok(self.skipped(SkipReason::AlreadyLoading, LoadKind::More));
            }
            if !state.has_more {
                return Ok(self.skipped(SkipReason::Exhausted, LoadKind::More));
            }
            let request = (state.page_size, state.next_offset());
            reduce_in_place(&mut state, FeedIntent::MoreLoadStarted);
            request
        };

        self.fetch(LoadKind::More, limit, offset)
    }

    /// Reset pagination and load the first page again.
    pub fn refresh(&self) -> Result<PageOutcome, FeedError> {
        self.start_initial(true)
    }

    /// Like an item.
    ///
    /// Returns `Ok(true)` when the loaded copy was updated and broadcast,
    /// `Ok(false)` when the repository accepted the like but the item is not
    /// in the loaded feed. Repository and local state are updated
    /// independently of each other.
    pub fn like_item(&self, id: &str) -> Result<bool, FeedError> {
        match self.repository.like_item(id) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(item_id = %id, "Like rejected: unknown item");
                return Err(FeedError::NotFound { id: id.to_string() });
            }
            Err(err) => {
                tracing::warn!(item_id = %id, error = %err, "Like failed");
                return Err(err.into());
            }
        }

        {
            let mut state = self.state.lock();
            if state.find(id).is_none() {
                tracing::debug!(item_id = %id, "Liked item is not loaded");
                return Ok(false);
            }
            reduce_in_place(&mut state, FeedIntent::ItemLiked { id: id.to_string() });
        }

        tracing::debug!(item_id = %id, "Item liked");
        self.broadcast();
        Ok(true)
    }

    /// Publish a new item as the viewer and put it at the top of the feed.
    ///
    /// Image and video items need `media`; text items must not have it.
    pub fn create_item(
        &self,
        content: impl Into<String>,
        kind: ItemKind,
        media: Option<String>,
    ) -> Result<FeedItem, FeedError> {
        validate_media(kind, media.as_deref())?;

        let item = FeedItem::new(
            Uuid::new_v4().to_string(),
            self.viewer.clone(),
            content,
            kind,
            media,
        );

        match self.repository.add_item(item.clone()) {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(item_id = %item.id, "Repository did not store new item");
                return Err(FeedError::Rejected {
                    operation: "add_item",
                });
            }
            Err(err) => {
                tracing::warn!(item_id = %item.id, error = %err, "Create failed");
                return Err(err.into());
            }
        }

        self.apply(FeedIntent::ItemCreated { item: item.clone() });
        tracing::debug!(item_id = %item.id, kind = %kind, "Item created");
        self.broadcast();
        Ok(item)
    }

    fn start_initial(&self, reset: bool) -> Result<PageOutcome, FeedError> {
        let limit = {
            let mut state = self.state.lock();
            if state.is_loading() {
                return Ok(self.skipped(SkipReason::AlreadyLoading, LoadKind::Initial));
            }
            if reset {
                reduce_in_place(&mut state, FeedIntent::Reset);
            }
            reduce_in_place(&mut state, FeedIntent::InitialLoadStarted);
            state.page_size
        };

        self.fetch(LoadKind::Initial, limit, 0)
    }

    /// Run a fetch whose start intent has already been applied.
    fn fetch(&self, kind: LoadKind, limit: usize, offset: usize) -> Result<PageOutcome, FeedError> {
        tracing::debug!(?kind, limit, offset, "Fetch started");
        self.broadcast();

        // Runs on every exit path, including a panicking repository.
        let _finish = scopeguard::guard(self, |vm| {
            vm.apply(FeedIntent::LoadFinished);
            vm.broadcast();
        });

        let result = self.repository.fetch_page(limit, offset);
        self.settle(kind, result)
    }

    fn settle(
        &self,
        kind: LoadKind,
        result: Result<Vec<FeedItem>, RepositoryError>,
    ) -> Result<PageOutcome, FeedError> {
        match result {
            Ok(items) => {
                let fetched = items.len();
                let intent = match kind {
                    LoadKind::Initial => FeedIntent::InitialPageLoaded { items },
                    LoadKind::More => FeedIntent::MorePageLoaded { items },
                };
                let mut state = self.state.lock();
                reduce_in_place(&mut state, intent);
                tracing::debug!(
                    ?kind,
                    fetched,
                    page = state.current_page,
                    has_more = state.has_more,
                    "Page loaded"
                );
                Ok(PageOutcome::Loaded {
                    fetched,
                    has_more: state.has_more,
                })
            }
            Err(err) => {
                tracing::warn!(?kind, error = %err, "Fetch failed");
                self.apply(FeedIntent::LoadFailed {
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    fn skipped(&self, reason: SkipReason, kind: LoadKind) -> PageOutcome {
        tracing::trace!(?kind, ?reason, "Load skipped");
        PageOutcome::Skipped(reason)
    }

    fn apply(&self, intent: FeedIntent) {
        reduce_in_place(&mut self.state.lock(), intent);
    }

    fn broadcast(&self) {
        let report = self.broadcaster.notify();
        if report.failed > 0 {
            tracing::warn!(
                delivered = report.delivered,
                failed = report.failed,
                "Some observers failed"
            );
        }
    }
}

fn reduce_in_place(state: &mut FeedState, intent: FeedIntent) {
    let current = std::mem::take(state);
    *state = FeedReducer::reduce(current, intent);
}
