//! In-memory repository with generated sample data.

use std::sync::Arc;

use chrono::{Duration, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::{FeedRepository, RepositoryError};
use crate::model::{Author, Counters, FeedItem, ItemKind};

const IMAGE_MEDIA: &str = "https://example.com/image.jpg";
const VIDEO_MEDIA: &str = "https://example.com/video.mp4";

/// Thread-safe in-memory repository.
///
/// Items are stored newest-inserted first. Failure switches let callers
/// exercise the view-model's error paths.
#[derive(Default)]
pub struct MockRepository {
    inner: Mutex<MockInner>,
}

#[derive(Default)]
struct MockInner {
    items: Vec<FeedItem>,
    fail_next_fetch: Option<String>,
    fail_likes: bool,
    reject_adds: bool,
    fetch_calls: Vec<(usize, usize)>,
}

impl MockRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding exactly `items`, in order.
    pub fn with_items(items: Vec<FeedItem>) -> Self {
        Self {
            inner: Mutex::new(MockInner {
                items,
                ..MockInner::default()
            }),
        }
    }

    /// Generate `count` sample items with ids "1"..=count.
    ///
    /// The same seed always produces the same authors, kinds and counters.
    /// Timestamps are relative to now, up to 72 hours in the past.
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let authors = sample_authors();
        let now = Utc::now();

        let items = (1..=count)
            .map(|i| {
                let author = authors
                    .choose(&mut rng)
                    .cloned()
                    .unwrap_or_else(|| authors[0].clone());
                let kind = *ItemKind::ALL.choose(&mut rng).unwrap_or(&ItemKind::Text);
                let (content, media) = match kind {
                    ItemKind::Text => (format!("This is a sample post #{i} with some content."), None),
                    ItemKind::Image => (
                        format!("Check out this image post #{i}"),
                        Some(IMAGE_MEDIA.to_string()),
                    ),
                    ItemKind::Video => (
                        format!("Video post #{i} - watch this!"),
                        Some(VIDEO_MEDIA.to_string()),
                    ),
                };

                FeedItem {
                    id: i.to_string(),
                    author,
                    content,
                    kind,
                    counters: Counters {
                        likes: rng.random_range(0..=100),
                        comments: rng.random_range(0..=50),
                        shares: rng.random_range(0..=30),
                    },
                    timestamp: now - Duration::hours(rng.random_range(0..=72)),
                    media,
                    liked_by_viewer: false,
                }
            })
            .collect();

        tracing::debug!(count, seed, "Generated mock feed items");
        Self::with_items(items)
    }

    /// Make the next `fetch_page` call fail with `message`.
    pub fn fail_next_fetch(&self, message: impl Into<String>) {
        self.inner.lock().fail_next_fetch = Some(message.into());
    }

    /// Make every `like_item` call fail until switched off.
    pub fn set_fail_likes(&self, fail: bool) {
        self.inner.lock().fail_likes = fail;
    }

    /// Make every `add_item` call report the item as not stored.
    pub fn set_reject_adds(&self, reject: bool) {
        self.inner.lock().reject_adds = reject;
    }

    /// Snapshot of the stored items.
    pub fn items(&self) -> Vec<FeedItem> {
        self.inner.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// `(limit, offset)` of every fetch seen so far.
    pub fn fetch_calls(&self) -> Vec<(usize, usize)> {
        self.inner.lock().fetch_calls.clone()
    }
}

impl FeedRepository for MockRepository {
    fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<FeedItem>, RepositoryError> {
        let mut inner = self.inner.lock();
        inner.fetch_calls.push((limit, offset));

        if let Some(message) = inner.fail_next_fetch.take() {
            return Err(RepositoryError::new(message));
        }

        let start = offset.min(inner.items.len());
        let end = offset.saturating_add(limit).min(inner.items.len());
        let mut page = inner.items[start..end].to_vec();
        // Stable sort keeps insertion order among equal timestamps.
        page.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(page)
    }

    fn like_item(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.lock();
        if inner.fail_likes {
            return Err(RepositoryError::new(format!("failed to like item '{id}'")));
        }

        match inner.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.register_like();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn add_item(&self, item: FeedItem) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.lock();
        if inner.reject_adds {
            return Ok(false);
        }
        inner.items.insert(0, item);
        Ok(true)
    }
}

fn sample_authors() -> Vec<Arc<Author>> {
    vec![
        Arc::new(Author::new("1", "John Doe", "johndoe").with_avatar("https://example.com/avatar1.jpg")),
        Arc::new(
            Author::new("2", "Jane Smith", "janesmith").with_avatar("https://example.com/avatar2.jpg"),
        ),
        Arc::new(
            Author::new("3", "Bob Johnson", "bobjohnson")
                .with_avatar("https://example.com/avatar3.jpg"),
        ),
    ]
}
