//! Unified error types for wa2mm.
//!
//! This module provides a single [`ConvertError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! Only configuration-level problems (missing transcript file, unusable
//! team/channel, broken output serialization) are surfaced as errors. Every
//! per-message issue — an unmapped user, an unknown emoji, a malformed
//! transcript line — degrades gracefully so a single bad entry cannot abort
//! an entire import run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for wa2mm operations.
///
/// # Example
///
/// ```rust
/// use wa2mm::error::Result;
/// use wa2mm::post::Post;
///
/// fn my_function() -> Result<Vec<Post>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConvertError>;

/// The error type for all wa2mm operations.
///
/// Each variant contains context about what went wrong and, where applicable,
/// the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration supplied before any parsing began.
    ///
    /// Examples: empty team or channel name, a transcript path that is not
    /// a file.
    #[error("Configuration error: {message}{}", path.as_ref().map(|p| format!(" (path: {})", p.display())).unwrap_or_default())]
    Config {
        /// Description of what's wrong
        message: String,
        /// The offending path, if there is one
        path: Option<PathBuf>,
    },

    /// A post carried a day/time pair that is not a real calendar instant.
    ///
    /// The transcript parser never produces such posts (it validates the
    /// timestamp before opening a post), so this is only reachable for
    /// [`Post`](crate::post::Post) values constructed directly.
    #[error("Invalid timestamp '{day} {time}'. Expected format: dd.mm.yyyy hh:mm")]
    Timestamp {
        /// The day string as written
        day: String,
        /// The time string as written
        time: String,
    },

    /// JSON serialization error while producing import records.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ConvertError {
    /// Creates a configuration error without an associated path.
    pub fn config(message: impl Into<String>) -> Self {
        ConvertError::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Creates a configuration error for a specific path.
    pub fn config_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ConvertError::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Creates a timestamp error.
    pub fn timestamp(day: impl Into<String>, time: impl Into<String>) -> Self {
        ConvertError::Timestamp {
            day: day.into(),
            time: time.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ConvertError::Io(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, ConvertError::Config { .. })
    }

    /// Returns `true` if this is a timestamp error.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, ConvertError::Timestamp { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
