//! Content model for parsed transcript messages.
//!
//! This module provides [`Post`], one logical chat message, and [`Segment`],
//! the typed pieces a message body is made of. The transcript parser produces
//! posts; the renderer and emitter consume them.
//!
//! # Overview
//!
//! A post consists of:
//! - `day` and `time` exactly as written in the transcript (`dd.mm.yyyy`,
//!   `hh:mm`)
//! - `author` display name exactly as written
//! - an ordered sequence of segments (order = rendering order)
//!
//! # Examples
//!
//! ```
//! use wa2mm::post::{Post, Segment};
//!
//! let post = Post::new(
//!     "25.12.2023",
//!     "09:30",
//!     "Alice",
//!     vec![Segment::text("Merry Christmas!")],
//! );
//! assert_eq!(post.author(), "Alice");
//! assert_eq!(post.created_at_millis(), Some(1703496600000));
//! ```

use chrono::NaiveDateTime;

/// One typed piece of a post's body.
///
/// Segments never mutate after creation; a post's content sequence is
/// append-only while the parser scans the transcript and frozen afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal transcript text, already unescaped.
    Text(String),
    /// A run of emoji scalar values as encountered in the transcript.
    Emoji(String),
    /// A phone number exactly as it appeared. The transcript marks unknown
    /// contacts by phone number rather than name.
    PhoneMention(String),
    /// The filename of an attached media file, relative to the media
    /// directory.
    MediaReference(String),
}

impl Segment {
    /// Creates a text segment.
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text(content.into())
    }

    /// Creates an emoji segment.
    pub fn emoji(raw: impl Into<String>) -> Self {
        Segment::Emoji(raw.into())
    }

    /// Creates a phone-mention segment.
    pub fn phone(digits: impl Into<String>) -> Self {
        Segment::PhoneMention(digits.into())
    }

    /// Creates a media-reference segment.
    pub fn media(filename: impl Into<String>) -> Self {
        Segment::MediaReference(filename.into())
    }

    /// Returns `true` if this is a text segment.
    pub fn is_text(&self) -> bool {
        matches!(self, Segment::Text(_))
    }
}

/// One logical chat message parsed from the transcript.
///
/// Created by the parser while scanning the transcript, immutable thereafter,
/// consumed once by the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Calendar date as written in the transcript (`dd.mm.yyyy`).
    pub day: String,
    /// Clock time as written (`hh:mm`).
    pub time: String,
    /// Display name exactly as it appears in the transcript.
    pub author: String,
    /// Ordered body segments. Always holds at least one segment; an empty
    /// message body is a single empty text segment.
    pub content: Vec<Segment>,
}

impl Post {
    /// Creates a post. An empty `content` sequence is normalized to a single
    /// empty text segment.
    pub fn new(
        day: impl Into<String>,
        time: impl Into<String>,
        author: impl Into<String>,
        content: Vec<Segment>,
    ) -> Self {
        let content = if content.is_empty() {
            vec![Segment::text("")]
        } else {
            content
        };
        Self {
            day: day.into(),
            time: time.into(),
            author: author.into(),
            content,
        }
    }

    /// Returns the day string as written.
    pub fn day(&self) -> &str {
        &self.day
    }

    /// Returns the time string as written.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the author display name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the body segments in rendering order.
    pub fn content(&self) -> &[Segment] {
        &self.content
    }

    /// Converts the post's `dd.mm.yyyy hh:mm` timestamp to epoch
    /// milliseconds, pinned to UTC.
    ///
    /// The timezone is pinned deliberately: the import target interprets
    /// `create_at` as an absolute instant, and relying on the host timezone
    /// would make output depend on where the conversion runs.
    ///
    /// Returns `None` for day/time pairs that are not a real calendar
    /// instant. The transcript parser validates timestamps before opening a
    /// post, so parser-produced posts always return `Some`.
    pub fn created_at_millis(&self) -> Option<i64> {
        parse_transcript_timestamp(&self.day, &self.time).map(|dt| dt.and_utc().timestamp_millis())
    }

    /// Returns the media filenames referenced by this post, in body order.
    pub fn media_references(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|seg| match seg {
            Segment::MediaReference(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// Parses a `dd.mm.yyyy` + `hh:mm` pair into a naive timestamp.
pub(crate) fn parse_transcript_timestamp(day: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{day} {time}"), "%d.%m.%Y %H:%M").ok()
}
