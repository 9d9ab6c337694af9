//! # wa2mm
//!
//! A Rust library for converting WhatsApp chat exports into the Mattermost
//! bulk-import JSONL format.
//!
//! ## Overview
//!
//! The pipeline turns a raw transcript into ordered, typed import records:
//!
//! 1. [`parser`] scans the line-oriented export into [`Post`]s, each an
//!    ordered sequence of typed [`Segment`](post::Segment)s (text, emoji,
//!    phone mentions, media references).
//! 2. [`maps`] resolve transcript identities (display names, phone numbers,
//!    emoji) to Mattermost identities, with defined fallbacks for unknown
//!    keys.
//! 3. [`render`] flattens each post into one message string and collects its
//!    media attachments; [`splitter`] bounds long messages into fragments
//!    with continuation markers.
//! 4. [`emitter`] produces the final record list and its JSONL form, ready
//!    for an external archiver or uploader.
//!
//! The pipeline is single-threaded, synchronous, and side-effect free: the
//! transcript and media directory are read-only inputs, and serialization to
//! bytes is the only boundary-crossing output. Network upload, retries, and
//! archive packaging are deliberately out of scope.
//!
//! ## Quick Start
//!
//! ```rust
//! use wa2mm::config::ConvertConfig;
//! use wa2mm::emitter::JsonlEmitter;
//! use wa2mm::maps::{EmojiMap, PhoneMap, UserMap};
//! use wa2mm::parser::TranscriptParser;
//!
//! fn main() -> wa2mm::Result<()> {
//!     let posts = TranscriptParser::new()
//!         .parse_str("25.12.2023, 09:30 - Alice: Merry Christmas 🎄");
//!
//!     let mut users = UserMap::new();
//!     users.add("Alice", "alice");
//!
//!     let config = ConvertConfig::new("my-team", "general")?;
//!     let conversion = JsonlEmitter::new(&config).emit(
//!         &posts,
//!         &users,
//!         &PhoneMap::new(),
//!         &EmojiMap::new(),
//!     )?;
//!
//!     let jsonl = conversion.to_jsonl()?;
//!     assert!(jsonl.starts_with(r#"{"type":"version","version":1}"#));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — [`TranscriptParser`](parser::TranscriptParser), transcript
//!   text → ordered [`Post`]s
//! - [`post`] — [`Post`] and [`Segment`](post::Segment) content model
//! - [`maps`] — [`UserMap`](maps::UserMap), [`PhoneMap`](maps::PhoneMap),
//!   [`EmojiMap`](maps::EmojiMap) identity maps
//! - [`render`] — segment flattening and attachment collection
//! - [`splitter`] — [`MessageSplitter`](splitter::MessageSplitter),
//!   length-bounded fragmenting
//! - [`emitter`] — [`JsonlEmitter`](emitter::JsonlEmitter), import records
//!   and JSONL serialization
//! - [`config`] — [`ConvertConfig`](config::ConvertConfig) and mapping-string
//!   parsing
//! - [`error`] — unified error types ([`ConvertError`], [`Result`])

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod emitter;
pub mod error;
pub mod maps;
pub mod parser;
pub mod post;
pub mod render;
pub mod splitter;

// Re-export the main types at the crate root for convenience
pub use error::{ConvertError, Result};
pub use post::Post;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use wa2mm::prelude::*;
/// ```
pub mod prelude {
    // Content model
    pub use crate::post::{Post, Segment};

    // Error types
    pub use crate::error::{ConvertError, Result};

    // Pipeline stages
    pub use crate::emitter::{Conversion, ImportRecord, JsonlEmitter};
    pub use crate::parser::TranscriptParser;
    pub use crate::render::render_post;
    pub use crate::splitter::MessageSplitter;

    // Identity maps
    pub use crate::maps::{EmojiMap, PhoneMap, ResolutionMiss, UserMap};

    // Configuration
    pub use crate::config::{ConvertConfig, parse_mappings};
}
