//! Observer broadcast for state-change notifications.
//!
//! The broadcaster carries no payload: observers re-read whatever state they
//! need from the object that notified them.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

/// Receiver of change notifications.
pub trait Observer: Send + Sync {
    /// Called synchronously on the notifying thread after every state change.
    fn on_change(&self);
}

impl<F> Observer for F
where
    F: Fn() + Send + Sync,
{
    fn on_change(&self) {
        self()
    }
}

/// Result of a single notification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotifyReport {
    /// Observers whose callback returned normally.
    pub delivered: usize,
    /// Observers whose callback panicked.
    pub failed: usize,
}

/// Ordered set of observers.
///
/// Identity is the `Arc` allocation: subscribing the same `Arc` twice is a
/// no-op, while two distinct `Arc`s wrapping equal values are two observers.
#[derive(Default)]
pub struct Broadcaster {
    observers: Mutex<Vec<Arc<dyn Observer>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Returns `false` if it was already subscribed.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> bool {
        let mut observers = self.observers.lock();
        if observers.iter().any(|o| same_observer(o, &observer)) {
            return false;
        }
        observers.push(observer);
        true
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, observer: &Arc<dyn Observer>) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|o| !same_observer(o, observer));
        observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.lock().is_empty()
    }

    /// Notify every observer in subscription order.
    ///
    /// The observer list is snapshotted first, so callbacks may subscribe or
    /// unsubscribe without deadlocking; such changes apply from the next pass.
    /// A panicking observer is logged and skipped.
    pub fn notify(&self) -> NotifyReport {
        let snapshot: Vec<Arc<dyn Observer>> = self.observers.lock().clone();
        let mut report = NotifyReport::default();

        for (index, observer) in snapshot.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| observer.on_change())) {
                Ok(()) => report.delivered += 1,
                Err(payload) => {
                    report.failed += 1;
                    tracing::warn!(
                        observer = index,
                        panic = %panic_message(payload.as_ref()),
                        "Observer panicked during notification"
                    );
                }
            }
        }

        report
    }
}

fn same_observer(a: &Arc<dyn Observer>, b: &Arc<dyn Observer>) -> bool {
    // Compare data pointers only; vtable pointers may differ across codegen units.
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
