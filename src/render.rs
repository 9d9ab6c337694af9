//! Flattens a post's segments into one message string plus attachments.
//!
//! Text segments append verbatim. Emoji resolve through the [`EmojiMap`] and
//! phone mentions through the [`PhoneMap`], each inserted with single-space
//! padding (a leading space only when the accumulated text does not already
//! end with one, so no double spaces appear). Media references are never
//! inlined; they are collected as attachment paths under the fixed media
//! subdirectory.

use log::warn;

use crate::maps::{EmojiMap, FALLBACK_USER, MissKind, PhoneMap, ResolutionMiss};
use crate::post::{Post, Segment};

/// Subdirectory inside the import archive where media files live.
pub const MEDIA_SUBDIR: &str = "data";

/// A post's body flattened for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPost {
    /// The flattened message text, before splitting.
    pub message: String,
    /// Attachment paths (`data/<filename>`), in body order.
    pub attachments: Vec<String>,
    /// Resolution gaps hit while flattening.
    pub misses: Vec<ResolutionMiss>,
}

/// Flattens `post`'s segments in order, resolving emoji and phone mentions.
pub fn render_post(post: &Post, phones: &PhoneMap, emojis: &EmojiMap) -> RenderedPost {
    let mut message = String::new();
    let mut attachments = Vec::new();
    let mut misses = Vec::new();

    for segment in post.content() {
        match segment {
            Segment::Text(text) => message.push_str(text),
            Segment::Emoji(raw) => match emojis.lookup(raw) {
                Some(shortcode) => push_padded(&mut message, shortcode),
                None => {
                    // Pass-through policy: unmapped emoji stay literal text.
                    warn!("unknown emoji '{raw}' - passing through");
                    misses.push(ResolutionMiss::new(MissKind::Emoji, raw.clone()));
                    message.push_str(raw);
                }
            },
            Segment::PhoneMention(digits) => {
                let username = phones.lookup(digits).unwrap_or_else(|| {
                    warn!("unknown phone number '{digits}' - using {FALLBACK_USER}");
                    misses.push(ResolutionMiss::new(MissKind::Phone, digits.clone()));
                    FALLBACK_USER
                });
                push_padded(&mut message, &format!("@{username}"));
            }
            Segment::MediaReference(filename) => {
                attachments.push(format!("{MEDIA_SUBDIR}/{filename}"));
            }
        }
    }

    RenderedPost {
        message,
        attachments,
        misses,
    }
}

/// Appends `value` with exactly one separating space before and after,
/// without doubling an existing trailing space.
fn push_padded(message: &mut String, value: &str) {
    if !message.ends_with(' ') {
        message.push(' ');
    }
    message.push_str(value);
    message.push(' ');
}
