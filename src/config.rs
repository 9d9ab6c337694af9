//! Conversion configuration.
//!
//! [`ConvertConfig`] carries the target team/channel and the message-length
//! bound as explicit values; nothing in the pipeline reads process-wide
//! state. [`parse_mappings`] understands the `"key"="value";…` syntax used
//! for supplying identity-map entries.

use log::warn;
use regex::Regex;

use crate::error::{ConvertError, Result};
use crate::splitter::DEFAULT_MAX_MESSAGE_LENGTH;

/// Configuration consumed by the conversion pipeline.
///
/// # Example
///
/// ```
/// use wa2mm::config::ConvertConfig;
///
/// let config = ConvertConfig::new("my-team", "general")?
///     .with_max_message_length(8000);
/// assert_eq!(config.max_message_length, 8000);
/// # Ok::<(), wa2mm::ConvertError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Target Mattermost team name.
    pub team: String,
    /// Target Mattermost channel name.
    pub channel: String,
    /// Maximum fragment length in Unicode scalar values. Out-of-range
    /// values fall back to the documented default when the splitter is
    /// built; see [`crate::splitter::MessageSplitter::new`].
    pub max_message_length: usize,
}

impl ConvertConfig {
    /// Creates a configuration for the given team and channel.
    ///
    /// Empty team or channel names are configuration errors: they would
    /// produce records the import endpoint rejects wholesale.
    pub fn new(team: impl Into<String>, channel: impl Into<String>) -> Result<Self> {
        let team = team.into();
        let channel = channel.into();
        if team.trim().is_empty() {
            return Err(ConvertError::config("team name is empty"));
        }
        if channel.trim().is_empty() {
            return Err(ConvertError::config("channel name is empty"));
        }
        Ok(Self {
            team,
            channel,
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
        })
    }

    /// Sets the maximum message fragment length.
    #[must_use]
    pub fn with_max_message_length(mut self, max: usize) -> Self {
        self.max_message_length = max;
        self
    }
}

/// Parses semicolon-separated mappings of the form `"key"="value"`.
///
/// Pairs that do not match the syntax are skipped with a warning; the order
/// of valid pairs is preserved so later entries overwrite earlier ones when
/// fed into an identity map.
///
/// # Example
///
/// ```
/// use wa2mm::config::parse_mappings;
///
/// let pairs = parse_mappings(r#""Alice Example"="alice";"Bob"="bob""#);
/// assert_eq!(pairs, vec![
///     ("Alice Example".to_owned(), "alice".to_owned()),
///     ("Bob".to_owned(), "bob".to_owned()),
/// ]);
/// ```
pub fn parse_mappings(mappings: &str) -> Vec<(String, String)> {
    // Static pattern, known-good.
    let pair_re = Regex::new(r#"^"(.+?)"="(.+?)"$"#).unwrap();

    let mut result = Vec::new();
    for pair in mappings.split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        match pair_re.captures(pair) {
            Some(caps) => result.push((caps[1].to_owned(), caps[2].to_owned())),
            None => warn!("skipping malformed mapping pair: {pair}"),
        }
    }
    result
}
