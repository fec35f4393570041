//! Console rendering of a feed.
//!
//! `FeedView` subscribes to a view-model and redraws the whole feed on every
//! notification. Items go through the first matching `ItemRenderer`, or the
//! built-in layout when none claims them.

mod plugins;

pub use plugins::{default_renderers, ImageRenderer, ItemRenderer, VideoRenderer};

use std::io::{self, Write};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::feed::{FeedState, FeedViewModel};
use crate::model::{FeedItem, ItemKind};
use crate::observer::Observer;

const RULE_WIDTH: usize = 50;

/// Observer that renders the feed to a writer.
pub struct FeedView<W> {
    view_model: Weak<FeedViewModel>,
    renderers: Vec<Box<dyn ItemRenderer>>,
    sink: Mutex<W>,
}

impl<W: Write + Send + 'static> FeedView<W> {
    /// Create a view and subscribe it to `view_model`.
    ///
    /// The view holds the view-model weakly, so subscribing does not create
    /// a reference cycle.
    pub fn attach(
        view_model: &Arc<FeedViewModel>,
        renderers: Vec<Box<dyn ItemRenderer>>,
        sink: W,
    ) -> Arc<Self> {
        let view = Arc::new(Self {
            view_model: Arc::downgrade(view_model),
            renderers,
            sink: Mutex::new(sink),
        });
        view_model.subscribe(view.clone());
        view
    }

    /// Access the underlying writer.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut sink = self.sink.lock();
        f(&mut *sink)
    }
}

impl<W: Write + Send + 'static> Observer for FeedView<W> {
    fn on_change(&self) {
        let Some(view_model) = self.view_model.upgrade() else {
            return;
        };
        let state = view_model.state();
        let mut sink = self.sink.lock();
        if let Err(err) = render_feed(&state, &self.renderers, &mut *sink) {
            tracing::warn!(error = %err, "Failed to render feed");
        }
    }
}

/// Render a full feed snapshot.
pub fn render_feed(
    state: &FeedState,
    renderers: &[Box<dyn ItemRenderer>],
    out: &mut dyn Write,
) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "SOCIAL MEDIA FEED")?;
    writeln!(out, "{rule}")?;

    if let Some(error) = &state.error {
        writeln!(out, "\nError: {error}\n")?;
    }

    if state.items.is_empty() && state.is_loading() {
        writeln!(out, "\nLoading posts...\n")?;
        return out.flush();
    }

    for item in &state.items {
        match renderers.iter().find(|r| r.can_handle(item)) {
            Some(renderer) => renderer.render(item, out)?,
            None => render_item(item, out)?,
        }
    }

    if state.is_loading() {
        writeln!(out, "\nLoading more posts...\n")?;
    } else if state.has_more {
        writeln!(out, "\nScroll to load more...\n")?;
    } else {
        writeln!(out, "\nNo more posts to load.\n")?;
    }
    out.flush()
}

/// Built-in layout for items no renderer claims.
pub fn render_item(item: &FeedItem, out: &mut dyn Write) -> io::Result<()> {
    let rule = "-".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{} (@{})", item.author.name, item.author.handle)?;
    writeln!(out, "Posted at: {}", item.timestamp.format("%Y-%m-%d %H:%M"))?;
    writeln!(out)?;
    writeln!(out, "{}", item.content)?;

    match item.kind {
        ItemKind::Image => writeln!(out, "\n[IMAGE: {}]", item.media.as_deref().unwrap_or("none"))?,
        ItemKind::Video => writeln!(out, "\n[VIDEO: {}]", item.media.as_deref().unwrap_or("none"))?,
        ItemKind::Text => {}
    }

    let like_status = if item.liked_by_viewer { "♥" } else { "♡" };
    writeln!(
        out,
        "\n{} {} likes | 💬 {} comments | ↪ {} shares",
        like_status, item.counters.likes, item.counters.comments, item.counters.shares
    )?;
    writeln!(out, "{rule}")
}
