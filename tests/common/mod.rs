//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use feedview::feed::{FeedState, FeedViewModel};
use feedview::model::{Author, FeedItem, ItemKind};
use feedview::observer::Observer;
use feedview::repository::MockRepository;
use parking_lot::Mutex;

/// `count` text items with ids "1"..=count and strictly decreasing timestamps,
/// so a page fetched from a `MockRepository` keeps insertion order.
pub fn items(count: usize) -> Vec<FeedItem> {
    let author = Arc::new(Author::new("1", "John Doe", "johndoe"));
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    (1..=count)
        .map(|i| {
            let mut item = FeedItem::new(i.to_string(), author.clone(), format!("post #{i}"), ItemKind::Text, None);
            item.timestamp = base - Duration::minutes(i as i64);
            item
        })
        .collect()
}

/// View-model over a repository holding `count` ordered items.
pub fn view_model(count: usize, page_size: usize) -> (Arc<MockRepository>, Arc<FeedViewModel>) {
    let repo = Arc::new(MockRepository::with_items(items(count)));
    let vm = Arc::new(FeedViewModel::new(repo.clone(), NonZeroUsize::new(page_size).unwrap()));
    (repo, vm)
}

/// Observer counting notifications.
pub fn broadcast_counter(vm: &FeedViewModel) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    vm.subscribe(Arc::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    }));
    count
}

/// Observer recording a state snapshot at every notification.
pub fn state_recorder(vm: &Arc<FeedViewModel>) -> Arc<Mutex<Vec<FeedState>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let weak = Arc::downgrade(vm);
    let log_in = log.clone();
    let observer: Arc<dyn Observer> = Arc::new(move || {
        if let Some(vm) = weak.upgrade() {
            log_in.lock().push(vm.state());
        }
    });
    vm.subscribe(observer);
    log
}

pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
