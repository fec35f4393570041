use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors raised when a feed item breaks the media invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{kind} items require a media reference")]
    MissingMedia { kind: ItemKind },

    #[error("text items must not carry a media reference")]
    UnexpectedMedia,
}

/// The person who published an item.
///
/// Authors are shared between items through `Arc` and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    /// Display name (e.g., "Jane Smith").
    pub name: String,
    /// Handle without the leading `@` (e.g., "janesmith").
    #[serde(rename = "username")]
    pub handle: String,
    #[serde(rename = "avatar_url", default)]
    pub avatar: Option<String>,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            handle: handle.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Variant of a feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Text,
    Image,
    Video,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Text, ItemKind::Image, ItemKind::Video];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Image => "image",
            ItemKind::Video => "video",
        }
    }

    /// Whether items of this kind must carry a media reference.
    pub fn requires_media(&self) -> bool {
        !matches!(self, ItemKind::Text)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ItemKind::Text),
            "image" => Ok(ItemKind::Image),
            "video" => Ok(ItemKind::Video),
            _ => Err(format!("unknown item kind: {s}")),
        }
    }
}

/// Engagement counters of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counters {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
}

/// A single timeline entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Stable identifier, unique within a repository.
    pub id: String,
    #[serde(rename = "user")]
    pub author: Arc<Author>,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(flatten)]
    pub counters: Counters,
    /// Serialized as RFC 3339. Timestamps without an offset are read as UTC.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "media_url", default)]
    pub media: Option<String>,
    #[serde(rename = "liked", default)]
    pub liked_by_viewer: bool,
}

impl FeedItem {
    /// Create an item with zero counters, stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        author: Arc<Author>,
        content: impl Into<String>,
        kind: ItemKind,
        media: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author,
            content: content.into(),
            kind,
            counters: Counters::default(),
            timestamp: Utc::now(),
            media,
            liked_by_viewer: false,
        }
    }

    /// Check the media invariant: image and video items carry media, text
    /// items do not.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_media(self.kind, self.media.as_deref())
    }

    /// Record a like from the viewer.
    pub fn register_like(&mut self) {
        self.counters.likes = self.counters.likes.saturating_add(1);
        self.liked_by_viewer = true;
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse an item. Accepts RFC 3339 timestamps and offset-less ISO 8601
    /// ones such as `2024-05-01T12:30:00.123456`, taken as UTC.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Parse an RFC 3339 timestamp, falling back to a naive ISO 8601 one in UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()),
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn validate_media(kind: ItemKind, media: Option<&str>) -> Result<(), ModelError> {
    match (kind.requires_media(), media) {
        (true, None) => Err(ModelError::MissingMedia { kind }),
        (false, Some(_)) => Err(ModelError::UnexpectedMedia),
        _ => Ok(()),
    }
}
