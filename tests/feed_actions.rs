mod common;

use std::sync::Arc;

use common::{broadcast_counter, count, items, view_model};
use feedview::feed::FeedError;
use feedview::model::ItemKind;
use feedview::repository::{FeedRepository, MockRepository};

#[test]
fn like_increments_count_and_broadcasts_once() {
    let mut seeded = items(3);
    seeded[0].counters.likes = 5;
    let repo = Arc::new(MockRepository::with_items(seeded));
    let vm = feedview::feed::FeedViewModel::new(repo.clone(), std::num::NonZeroUsize::new(10).unwrap());
    vm.load_initial().unwrap();

    let broadcasts = broadcast_counter(&vm);
    assert_eq!(vm.like_item("1"), Ok(true));

    let item = vm.state().find("1").cloned().unwrap();
    assert_eq!(item.counters.likes, 6);
    assert!(item.liked_by_viewer);
    assert_eq!(count(&broadcasts), 1);
    assert_eq!(repo.items()[0].counters.likes, 6);
}

#[test]
fn like_unknown_id_leaves_state_untouched() {
    let (_repo, vm) = view_model(3, 10);
    vm.load_initial().unwrap();
    let before = vm.state();

    let broadcasts = broadcast_counter(&vm);
    assert_eq!(
        vm.like_item("404"),
        Err(FeedError::NotFound {
            id: "404".to_string()
        })
    );
    assert_eq!(vm.state(), before);
    assert_eq!(count(&broadcasts), 0);
}

#[test]
fn like_repository_failure_does_not_broadcast() {
    let (repo, vm) = view_model(3, 10);
    vm.load_initial().unwrap();
    let before = vm.state();

    repo.set_fail_likes(true);
    let broadcasts = broadcast_counter(&vm);
    assert!(matches!(vm.like_item("1"), Err(FeedError::Repository(_))));
    assert_eq!(vm.state(), before);
    assert_eq!(vm.state().error, None);
    assert_eq!(count(&broadcasts), 0);
}

#[test]
fn like_of_item_not_yet_loaded() {
    let (repo, vm) = view_model(15, 10);
    vm.load_initial().unwrap();

    let broadcasts = broadcast_counter(&vm);
    assert_eq!(vm.like_item("12"), Ok(false));
    assert_eq!(count(&broadcasts), 0);
    assert!(repo.items()[11].liked_by_viewer);
}

#[test]
fn liking_twice_counts_twice() {
    let (_repo, vm) = view_model(1, 10);
    vm.load_initial().unwrap();
    vm.like_item("1").unwrap();
    vm.like_item("1").unwrap();
    assert_eq!(vm.state().items[0].counters.likes, 2);
}

#[test]
fn create_on_empty_feed() {
    let (repo, vm) = view_model(0, 10);
    let broadcasts = broadcast_counter(&vm);

    let created = vm.create_item("hello", ItemKind::Text, None).unwrap();

    let state = vm.state();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0], created);
    assert_eq!(state.items[0].content, "hello");
    assert_eq!(state.items[0].counters.likes, 0);
    assert_eq!(count(&broadcasts), 1);
    assert_eq!(repo.len(), 1);
}

#[test]
fn create_prepends_to_loaded_feed() {
    let (_repo, vm) = view_model(3, 10);
    vm.load_initial().unwrap();

    let created = vm
        .create_item("sunset", ItemKind::Image, Some("https://example.com/sunset.jpg".to_string()))
        .unwrap();
    let state = vm.state();
    assert_eq!(state.items.len(), 4);
    assert_eq!(state.items[0].id, created.id);
    assert_eq!(state.items[0].author.handle, "currentuser");
}

#[test]
fn create_rejected_by_repository() {
    let (repo, vm) = view_model(2, 10);
    vm.load_initial().unwrap();
    let before = vm.state();

    repo.set_reject_adds(true);
    let broadcasts = broadcast_counter(&vm);
    assert_eq!(
        vm.create_item("nope", ItemKind::Text, None),
        Err(FeedError::Rejected {
            operation: "add_item"
        })
    );
    assert_eq!(vm.state(), before);
    assert_eq!(count(&broadcasts), 0);
}

#[test]
fn create_text_with_media_is_invalid() {
    let (repo, vm) = view_model(0, 10);
    let result = vm.create_item("text", ItemKind::Text, Some("https://example.com/x.jpg".to_string()));
    assert!(matches!(result, Err(FeedError::InvalidItem(_))));
    assert!(repo.is_empty());
}

#[test]
fn created_item_is_fetched_on_refresh() {
    let (repo, vm) = view_model(3, 10);
    vm.load_initial().unwrap();
    let created = vm.create_item("new", ItemKind::Text, None).unwrap();
    vm.refresh().unwrap();

    assert_eq!(repo.fetch_page(10, 0).unwrap().len(), 4);
    assert!(vm.state().find(&created.id).is_some());
}

#[test]
fn panicking_observer_does_not_break_operations() {
    let (_repo, vm) = view_model(3, 10);
    vm.subscribe(Arc::new(|| {
        panic!("render failure");
    }));
    let broadcasts = broadcast_counter(&vm);

    vm.load_initial().unwrap();
    assert_eq!(count(&broadcasts), 2);
    assert_eq!(vm.state().items.len(), 3);
}

#[test]
fn unsubscribed_observer_is_not_notified() {
    let (_repo, vm) = view_model(3, 10);
    let hits = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let h = hits.clone();
    let observer: Arc<dyn feedview::observer::Observer> = Arc::new(move || {
        h.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });

    assert!(vm.subscribe(observer.clone()));
    assert!(!vm.subscribe(observer.clone()));
    vm.load_initial().unwrap();
    assert_eq!(count(&hits), 2);

    assert!(vm.unsubscribe(&observer));
    vm.load_initial().unwrap();
    assert_eq!(count(&hits), 2);
}
