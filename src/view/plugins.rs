//! Per-kind item renderers.

use std::io::{self, Write};

use crate::model::{FeedItem, ItemKind};

/// Renderer for the items it claims.
///
/// A view asks its renderers in registration order; the first whose
/// `can_handle` returns true renders the item.
pub trait ItemRenderer: Send + Sync {
    fn can_handle(&self, item: &FeedItem) -> bool;

    fn render(&self, item: &FeedItem, out: &mut dyn Write) -> io::Result<()>;
}

/// Shows image items as a media tag followed by the content.
pub struct ImageRenderer;

impl ItemRenderer for ImageRenderer {
    fn can_handle(&self, item: &FeedItem) -> bool {
        item.kind == ItemKind::Image
    }

    fn render(&self, item: &FeedItem, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "[IMAGE CONTENT: {}]", media_or_placeholder(item))?;
        writeln!(out, "{}", item.content)
    }
}

/// Shows video items as a preview tag followed by the content.
pub struct VideoRenderer;

impl ItemRenderer for VideoRenderer {
    fn can_handle(&self, item: &FeedItem) -> bool {
        item.kind == ItemKind::Video
    }

    fn render(&self, item: &FeedItem, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "[VIDEO PREVIEW: {}]", media_or_placeholder(item))?;
        writeln!(out, "{}", item.content)
    }
}

/// The built-in renderers, image then video.
pub fn default_renderers() -> Vec<Box<dyn ItemRenderer>> {
    vec![Box::new(ImageRenderer), Box::new(VideoRenderer)]
}

fn media_or_placeholder(item: &FeedItem) -> &str {
    item.media.as_deref().unwrap_or("none")
}
