//! Feed item and author value types.
//!
//! Items are plain values: the view-model owns its copies and mutates them
//! only through its own transitions.

mod types;

pub use types::{parse_timestamp, Author, Counters, FeedItem, ItemKind, ModelError};

pub(crate) use types::validate_media;
