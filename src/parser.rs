//! WhatsApp TXT transcript parser.
//!
//! The export is line-oriented: each message begins with a
//! `dd.mm.yyyy, hh:mm - Author: ` prefix and subsequent lines lacking that
//! prefix are continuation lines of the previous message.
//!
//! ```text
//! 25.12.2023, 09:30 - Alice: Merry Christmas 🎄
//! and a happy new year
//! 25.12.2023, 09:31 - Bob: IMG-20231225-WA0001.jpg (file attached)
//! ```
//!
//! Message bodies are segmented into typed [`Segment`]s in a single
//! deterministic left-to-right pass: media-attachment markers first, then
//! phone-number mentions, then emoji runs; everything else is literal text.
//! Once a span is classified it is not re-scanned.

use std::fs;
use std::path::Path;

use log::warn;
use regex::Regex;

use crate::error::{ConvertError, Result};
use crate::post::{Post, Segment, parse_transcript_timestamp};

/// Message-start pattern: `25.12.2023, 09:30 - Sender: Message`.
const MESSAGE_START_PATTERN: &str = r"^(\d{2}\.\d{2}\.\d{4}), (\d{2}:\d{2}) - ([^:]+): (.*)$";

/// Media-attachment markers: `<attached: FILE>` (iOS) and
/// `FILE (file attached)` (Android).
const MEDIA_PATTERN: &str = r"<attached:\s*([^>]+)>|(\S+) \(file attached\)";

/// Phone-number mention: `@` followed by 6-15 digits, optionally with a
/// leading `+`.
const PHONE_MENTION_PATTERN: &str = r"@(\+?\d{6,15})";

/// Parser for WhatsApp TXT transcripts.
///
/// # Example
///
/// ```rust,no_run
/// use wa2mm::parser::TranscriptParser;
///
/// let parser = TranscriptParser::new();
/// let posts = parser.parse("whatsapp_chat.txt".as_ref())?;
/// # Ok::<(), wa2mm::ConvertError>(())
/// ```
pub struct TranscriptParser {
    message_start: Regex,
    media: Regex,
    phone: Regex,
}

impl TranscriptParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        // Static patterns, known-good.
        Self {
            message_start: Regex::new(MESSAGE_START_PATTERN).unwrap(),
            media: Regex::new(MEDIA_PATTERN).unwrap(),
            phone: Regex::new(PHONE_MENTION_PATTERN).unwrap(),
        }
    }

    /// Parses a transcript file into ordered posts.
    ///
    /// A missing or unreadable file is a fatal configuration error; nothing
    /// about the transcript content itself is.
    pub fn parse(&self, path: &Path) -> Result<Vec<Post>> {
        if !path.is_file() {
            return Err(ConvertError::config_path("transcript file not found", path));
        }
        let content = fs::read_to_string(path)?;
        Ok(self.parse_str(&content))
    }

    /// Parses transcript content from a string.
    ///
    /// This never fails: malformed lines become continuation text of the
    /// previous post, and lines before the first recognized post are
    /// skipped.
    pub fn parse_str(&self, content: &str) -> Vec<Post> {
        let mut posts: Vec<Post> = Vec::new();

        for line in content.lines() {
            if let Some(caps) = self.message_start.captures(line) {
                let day = caps.get(1).map_or("", |m| m.as_str());
                let time = caps.get(2).map_or("", |m| m.as_str());
                let author = caps.get(3).map_or("", |m| m.as_str().trim());
                let body = caps.get(4).map_or("", |m| m.as_str());

                // A prefix with an impossible calendar date is not a
                // message start; treat the whole line as continuation text.
                if parse_transcript_timestamp(day, time).is_some() {
                    posts.push(Post::new(day, time, author, self.segment_body(body)));
                    continue;
                }
            }

            // Continuation of the previous message (multiline), or a
            // malformed line.
            match posts.last_mut() {
                Some(last) => append_continuation(&mut last.content, self.segment_body(line)),
                // No post to attach to; dropped, but not silently.
                None => {
                    if !line.trim().is_empty() {
                        warn!("skipping orphan line before first message: {line}");
                    }
                }
            }
        }

        posts
    }

    /// Segments one body line. Deterministic and non-overlapping: media
    /// markers claim their spans first, the gaps are scanned for phone
    /// mentions, and the remaining text is scanned for emoji runs.
    fn segment_body(&self, body: &str) -> Vec<Segment> {
        let mut segments = Vec::new();

        let mut cursor = 0;
        for caps in self.media.captures_iter(body) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let filename = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str().trim());
            self.segment_plain(&body[cursor..whole.start], &mut segments);
            push_merged(&mut segments, Segment::media(filename));
            cursor = whole.end;
        }
        self.segment_plain(&body[cursor..], &mut segments);

        segments
    }

    /// Segments media-free text: phone mentions, then emoji runs.
    fn segment_plain(&self, text: &str, segments: &mut Vec<Segment>) {
        let mut cursor = 0;
        for caps in self.phone.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let digits = caps.get(1).map_or("", |m| m.as_str());
            segment_emoji(&text[cursor..whole.start], segments);
            push_merged(segments, Segment::phone(digits));
            cursor = whole.end;
        }
        segment_emoji(&text[cursor..], segments);
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits mention-free text into text and emoji-run segments.
fn segment_emoji(text: &str, segments: &mut Vec<Segment>) {
    let mut run_start = 0;
    let mut in_emoji = false;

    for (idx, c) in text.char_indices() {
        // Joiners and modifiers only continue a run, they never start one.
        let emoji = is_emoji_scalar(c) || (in_emoji && is_emoji_joiner(c));
        if emoji == in_emoji {
            continue;
        }
        if run_start < idx {
            let span = &text[run_start..idx];
            let segment = if in_emoji {
                Segment::emoji(span)
            } else {
                Segment::text(span)
            };
            push_merged(segments, segment);
        }
        run_start = idx;
        in_emoji = emoji;
    }

    if run_start < text.len() {
        let span = &text[run_start..];
        let segment = if in_emoji {
            Segment::emoji(span)
        } else {
            Segment::text(span)
        };
        push_merged(segments, segment);
    }
}

/// Returns `true` for scalar values that start or continue an emoji run.
fn is_emoji_scalar(c: char) -> bool {
    matches!(c,
        '\u{1F300}'..='\u{1FAFF}' // pictographs, emoticons, transport, extended
        | '\u{1F1E6}'..='\u{1F1FF}' // regional indicators (flags)
        | '\u{2600}'..='\u{27BF}' // misc symbols, dingbats
        | '\u{2B00}'..='\u{2BFF}' // arrows and stars (⭐ ⬆)
        | '\u{FE0F}' // variation selector
    )
}

/// Zero-width joiner and modifiers that glue an emoji sequence together.
fn is_emoji_joiner(c: char) -> bool {
    matches!(c, '\u{200D}' | '\u{FE0E}' | '\u{20E3}')
}

/// Appends a segment, merging adjacent text segments instead of creating
/// redundant ones.
fn push_merged(segments: &mut Vec<Segment>, segment: Segment) {
    if let (Some(Segment::Text(prev)), Segment::Text(next)) = (segments.last_mut(), &segment) {
        prev.push_str(next);
        return;
    }
    segments.push(segment);
}

/// Appends a continuation line's segments to an open post, joined by a
/// newline.
fn append_continuation(content: &mut Vec<Segment>, line_segments: Vec<Segment>) {
    match content.last_mut() {
        Some(Segment::Text(text)) => text.push('\n'),
        _ => content.push(Segment::text("\n")),
    }
    for segment in line_segments {
        push_merged(content, segment);
    }
}
