//! Identity maps from transcript identities to Mattermost identities.
//!
//! Three maps are consulted during conversion:
//!
//! - [`UserMap`] — display name → Mattermost username
//! - [`PhoneMap`] — phone digits → Mattermost username
//! - [`EmojiMap`] — emoji → Mattermost emoji shortcode
//!
//! All maps are built fully before conversion begins and are read-only during
//! conversion. Lookups never fail: one missing mapping must not abort an
//! entire import run. Unknown users and phone numbers resolve to
//! [`FALLBACK_USER`]; unknown emoji pass through as literal text. Misses are
//! reported to the caller as [`ResolutionMiss`] events so they can be
//! asserted on and summarized, in addition to a `log::warn!` diagnostic.

use std::collections::HashMap;

use log::warn;

/// Username substituted for any display name or phone number without a
/// mapping.
pub const FALLBACK_USER: &str = "unknown-user";

/// Which map failed to resolve a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissKind {
    /// A display name without a [`UserMap`] entry.
    User,
    /// A phone number without a [`PhoneMap`] entry.
    Phone,
    /// An emoji without an [`EmojiMap`] entry.
    Emoji,
}

impl std::fmt::Display for MissKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissKind::User => write!(f, "user"),
            MissKind::Phone => write!(f, "phone"),
            MissKind::Emoji => write!(f, "emoji"),
        }
    }
}

/// An observable resolution-gap event: a key was looked up and had no
/// mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionMiss {
    /// Which map missed.
    pub kind: MissKind,
    /// The key that had no mapping.
    pub key: String,
}

impl ResolutionMiss {
    pub(crate) fn new(kind: MissKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }
}

impl std::fmt::Display for ResolutionMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unmapped {} '{}'", self.kind, self.key)
    }
}

/// Display name → Mattermost username.
///
/// # Example
///
/// ```
/// use wa2mm::maps::{UserMap, FALLBACK_USER};
///
/// let mut users = UserMap::new();
/// users.add("Alice Example", "alice");
/// assert_eq!(users.get("Alice Example"), "alice");
/// assert_eq!(users.get("Nobody"), FALLBACK_USER);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UserMap {
    entries: HashMap<String, String>,
}

impl UserMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a mapping; last write wins.
    pub fn add(&mut self, display_name: impl Into<String>, username: impl Into<String>) {
        self.entries.insert(display_name.into(), username.into());
    }

    /// Returns the mapped username, if present.
    pub fn lookup(&self, display_name: &str) -> Option<&str> {
        self.entries.get(display_name).map(String::as_str)
    }

    /// Returns the mapped username, or [`FALLBACK_USER`] with a warning
    /// diagnostic. Never fails.
    pub fn get(&self, display_name: &str) -> &str {
        self.lookup(display_name).unwrap_or_else(|| {
            warn!("unknown user '{display_name}' - using {FALLBACK_USER}");
            FALLBACK_USER
        })
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Phone digits → Mattermost username.
#[derive(Debug, Clone, Default)]
pub struct PhoneMap {
    entries: HashMap<String, String>,
}

impl PhoneMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a mapping; last write wins.
    pub fn add(&mut self, phone: impl Into<String>, username: impl Into<String>) {
        self.entries.insert(phone.into(), username.into());
    }

    /// Returns the mapped username, if present.
    pub fn lookup(&self, phone: &str) -> Option<&str> {
        self.entries.get(phone).map(String::as_str)
    }

    /// Returns the mapped username, or [`FALLBACK_USER`] with a warning
    /// diagnostic. Never fails.
    pub fn get(&self, phone: &str) -> &str {
        self.lookup(phone).unwrap_or_else(|| {
            warn!("unknown phone number '{phone}' - using {FALLBACK_USER}");
            FALLBACK_USER
        })
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Emoji → Mattermost emoji shortcode (e.g. `🎉` → `:tada:`).
///
/// Unknown-key policy: the original emoji passes through unchanged as literal
/// text. Mattermost renders raw Unicode emoji fine, so pass-through degrades
/// better than a placeholder token would.
#[derive(Debug, Clone, Default)]
pub struct EmojiMap {
    entries: HashMap<String, String>,
}

impl EmojiMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a mapping; last write wins.
    pub fn add(&mut self, emoji: impl Into<String>, shortcode: impl Into<String>) {
        self.entries.insert(emoji.into(), shortcode.into());
    }

    /// Returns the mapped shortcode, if present.
    pub fn lookup(&self, emoji: &str) -> Option<&str> {
        self.entries.get(emoji).map(String::as_str)
    }

    /// Returns the mapped shortcode, or the emoji itself with a warning
    /// diagnostic. Never fails.
    pub fn get<'a>(&'a self, emoji: &'a str) -> &'a str {
        self.lookup(emoji).unwrap_or_else(|| {
            warn!("unknown emoji '{emoji}' - passing through");
            emoji
        })
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_map_add_get() {
        let mut users = UserMap::new();
        users.add("Alice Example", "alice");
        users.add("Bob Example", "bob");
        assert_eq!(users.get("Alice Example"), "alice");
        assert_eq!(users.count(), 2);
    }

    #[test]
    fn test_user_map_last_write_wins() {
        let mut users = UserMap::new();
        users.add("Alice", "alice-old");
        users.add("Alice", "alice");
        assert_eq!(users.get("Alice"), "alice");
        assert_eq!(users.count(), 1);
    }

    #[test]
    fn test_user_map_fallback() {
        let users = UserMap::new();
        assert_eq!(users.get("Nobody"), FALLBACK_USER);
        assert!(users.lookup("Nobody").is_none());
    }

    #[test]
    fn test_phone_map_fallback_never_panics() {
        let phones = PhoneMap::new();
        assert_eq!(phones.get("000"), "unknown-user");
    }

    #[test]
    fn test_phone_map_add_get() {
        let mut phones = PhoneMap::new();
        phones.add("491701234567", "alice");
        assert_eq!(phones.get("491701234567"), "alice");
        assert_eq!(phones.lookup("491701234567"), Some("alice"));
    }

    #[test]
    fn test_emoji_map_passthrough() {
        let emojis = EmojiMap::new();
        assert_eq!(emojis.get("🎉"), "🎉");
    }

    #[test]
    fn test_emoji_map_mapped() {
        let mut emojis = EmojiMap::new();
        emojis.add("🎉", ":tada:");
        assert_eq!(emojis.get("🎉"), ":tada:");
    }

    #[test]
    fn test_empty_and_count() {
        let users = UserMap::new();
        assert!(users.is_empty());
        assert_eq!(users.count(), 0);

        let mut emojis = EmojiMap::new();
        emojis.add("👍", ":+1:");
        assert!(!emojis.is_empty());
    }

    #[test]
    fn test_miss_display() {
        let miss = ResolutionMiss::new(MissKind::Phone, "000");
        assert_eq!(miss.to_string(), "unmapped phone '000'");
    }
}
