//! Paginated feed view-model with observer broadcast.
//!
//! ```text
//! consumer ──→ FeedViewModel ──→ FeedRepository
//!                   │
//!                   └──→ Broadcaster ──→ Observers (FeedView, ...)
//! ```

pub mod config;
pub mod feed;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod observer;
pub mod repository;
pub mod view;
