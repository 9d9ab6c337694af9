//! Mattermost bulk-import record emission.
//!
//! Composes parsed posts, the identity maps, and the splitter into the final
//! ordered record list and its JSONL form: one JSON object per line, line 1
//! always `{"type":"version","version":1}`, then one `post` record per
//! fragment. Serialization is UTF-8 with non-ASCII characters emitted
//! literally (emoji and non-Latin text are not escaped).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::maps::{EmojiMap, FALLBACK_USER, MissKind, PhoneMap, ResolutionMiss, UserMap};
use crate::post::Post;
use crate::render::render_post;
use crate::splitter::MessageSplitter;

/// Bulk-import format version emitted as the first record.
pub const IMPORT_FORMAT_VERSION: u32 = 1;

/// One line of the bulk-import JSONL stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImportRecord {
    /// Format marker, always the first record.
    Version {
        /// Import format version.
        version: u32,
    },
    /// One message fragment.
    Post {
        /// The post payload.
        post: PostRecord,
    },
}

/// The `post` payload of an import record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Target team name.
    pub team: String,
    /// Target channel name.
    pub channel: String,
    /// Resolved Mattermost username.
    pub user: String,
    /// One length-bounded message fragment.
    pub message: String,
    /// Post creation time in epoch milliseconds (UTC).
    pub create_at: i64,
    /// Media attachments; only present on the first fragment of a split
    /// message, and omitted entirely when empty.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attachments: Option<Vec<ImportAttachment>>,
}

/// One attachment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportAttachment {
    /// Path inside the import archive, e.g. `data/IMG-1.jpg`.
    pub path: String,
}

/// Summary of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Number of posts converted.
    pub posts: usize,
    /// Number of emitted `post` records (≥ `posts` when messages split).
    pub fragments: usize,
    /// Every resolution gap hit, in emission order.
    pub misses: Vec<ResolutionMiss>,
}

impl ConversionReport {
    /// Returns `true` if every identity resolved.
    pub fn is_clean(&self) -> bool {
        self.misses.is_empty()
    }
}

/// The outcome of a conversion: ordered records plus diagnostics.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Ordered import records, version marker first.
    pub records: Vec<ImportRecord>,
    /// Diagnostics collected along the way.
    pub report: ConversionReport,
}

impl Conversion {
    /// Serializes the records to JSONL: one JSON value per line, in emission
    /// order, newline-joined, UTF-8.
    pub fn to_jsonl(&self) -> Result<String> {
        let mut lines = Vec::with_capacity(self.records.len());
        for record in &self.records {
            lines.push(serde_json::to_string(record)?);
        }
        Ok(lines.join("\n"))
    }

    /// Returns attachment paths whose files are missing from `media_dir`.
    ///
    /// The media directory is only consulted to validate existence; it is
    /// never required to resolve filenames.
    pub fn missing_media(&self, media_dir: &Path) -> Vec<String> {
        let mut missing = Vec::new();
        for record in &self.records {
            let ImportRecord::Post { post } = record else {
                continue;
            };
            for attachment in post.attachments.iter().flatten() {
                let filename = attachment
                    .path
                    .rsplit('/')
                    .next()
                    .unwrap_or(attachment.path.as_str());
                if !media_dir.join(filename).is_file() {
                    missing.push(attachment.path.clone());
                }
            }
        }
        missing
    }
}

/// Emits Mattermost bulk-import records from parsed posts.
///
/// # Example
///
/// ```
/// use wa2mm::config::ConvertConfig;
/// use wa2mm::emitter::JsonlEmitter;
/// use wa2mm::maps::{EmojiMap, PhoneMap, UserMap};
/// use wa2mm::parser::TranscriptParser;
///
/// # fn main() -> wa2mm::Result<()> {
/// let posts = TranscriptParser::new().parse_str("25.12.2023, 09:30 - Alice: hi");
/// let config = ConvertConfig::new("my-team", "general")?;
/// let emitter = JsonlEmitter::new(&config);
/// let conversion = emitter.emit(
///     &posts,
///     &UserMap::new(),
///     &PhoneMap::new(),
///     &EmojiMap::new(),
/// )?;
/// assert_eq!(conversion.records.len(), 2); // version + one post
/// # Ok(())
/// # }
/// ```
pub struct JsonlEmitter {
    team: String,
    channel: String,
    splitter: MessageSplitter,
}

impl JsonlEmitter {
    /// Creates an emitter for the configured team and channel.
    pub fn new(config: &ConvertConfig) -> Self {
        Self {
            team: config.team.clone(),
            channel: config.channel.clone(),
            splitter: MessageSplitter::new(config.max_message_length),
        }
    }

    /// Converts posts into the ordered record list, consulting the identity
    /// maps for every author, mention and emoji, and the splitter for long
    /// messages.
    ///
    /// Resolution gaps never fail the run; they resolve via fallback and
    /// land in the report. The only error path is a post whose day/time is
    /// not a real calendar instant, which parser-produced posts never carry.
    pub fn emit(
        &self,
        posts: &[Post],
        users: &UserMap,
        phones: &PhoneMap,
        emojis: &EmojiMap,
    ) -> Result<Conversion> {
        let mut records = vec![ImportRecord::Version {
            version: IMPORT_FORMAT_VERSION,
        }];
        let mut report = ConversionReport::default();

        for post in posts {
            let create_at = post
                .created_at_millis()
                .ok_or_else(|| ConvertError::timestamp(post.day(), post.time()))?;

            let user = match users.lookup(post.author()) {
                Some(username) => username.to_owned(),
                None => {
                    log::warn!(
                        "unknown user '{}' - using {FALLBACK_USER}",
                        post.author()
                    );
                    report
                        .misses
                        .push(ResolutionMiss::new(MissKind::User, post.author()));
                    FALLBACK_USER.to_owned()
                }
            };

            let mut rendered = render_post(post, phones, emojis);
            report.misses.append(&mut rendered.misses);

            let attachments: Vec<ImportAttachment> = rendered
                .attachments
                .into_iter()
                .map(|path| ImportAttachment { path })
                .collect();

            for (index, fragment) in self.splitter.split(&rendered.message).into_iter().enumerate()
            {
                // Attachments ride on the first fragment only.
                let attachments = if index == 0 && !attachments.is_empty() {
                    Some(attachments.clone())
                } else {
                    None
                };
                records.push(ImportRecord::Post {
                    post: PostRecord {
                        team: self.team.clone(),
                        channel: self.channel.clone(),
                        user: user.clone(),
                        message: fragment,
                        create_at,
                        attachments,
                    },
                });
                report.fragments += 1;
            }
            report.posts += 1;
        }

        Ok(Conversion { records, report })
    }
}
