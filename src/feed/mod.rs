//! Paginated feed state machine.
//!
//! `FeedReducer` holds the pure transitions over `FeedState`;
//! `FeedViewModel` sequences them around repository calls and broadcasts
//! after each observable change.

mod error;
mod intent;
mod reducer;
mod state;
mod view_model;

pub use error::FeedError;
pub use intent::FeedIntent;
pub use reducer::FeedReducer;
pub use state::{FeedPhase, FeedState, LoadKind, DEFAULT_PAGE_SIZE};
pub use view_model::{FeedViewModel, PageOutcome, SkipReason};
