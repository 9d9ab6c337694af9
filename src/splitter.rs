//! Length-bounded message splitting.
//!
//! Mattermost rejects posts longer than its message limit, so long flattened
//! messages are split into fragments joined by continuation markers. All
//! length accounting is in Unicode scalar values, never bytes; the same unit
//! is used for every boundary decision.
//!
//! Splitting preference order:
//! 1. whole lines,
//! 2. word boundaries within an over-long line,
//! 3. fixed-size code-point chunks within an over-long word.
//!
//! Fragments are exact contiguous substrings of the input (line and word
//! separators stay with the piece that precedes them), so stripping the
//! markers and concatenating the fragments reproduces the input
//! byte-for-byte.

/// Default maximum fragment length in Unicode scalar values. Leaves a buffer
/// below the protocol ceiling.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 16_000;

/// Hard upper bound: the Mattermost post-message limit.
pub const MAX_MESSAGE_LENGTH_CEILING: usize = 16_383;

/// Appended to every fragment except the last.
pub const CONTINUATION_SUFFIX: &str = "\n\n... (continued)";

/// Prepended to every fragment except the first.
pub const CONTINUATION_PREFIX: &str = "(continued) ...\n\n";

/// Splits flattened messages into fragments no longer than a configured
/// bound.
///
/// # Example
///
/// ```
/// use wa2mm::splitter::MessageSplitter;
///
/// let splitter = MessageSplitter::default();
/// assert_eq!(splitter.split("short message"), vec!["short message"]);
/// ```
#[derive(Debug, Clone)]
pub struct MessageSplitter {
    max_length: usize,
}

impl Default for MessageSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGE_LENGTH)
    }
}

impl MessageSplitter {
    /// Creates a splitter with the given maximum fragment length.
    ///
    /// Out-of-range values fall back to [`DEFAULT_MAX_MESSAGE_LENGTH`]:
    /// zero, anything above [`MAX_MESSAGE_LENGTH_CEILING`], and bounds too
    /// small to fit the continuation markers plus one character of content.
    pub fn new(max_length: usize) -> Self {
        let overhead = marker_overhead();
        let max_length = if max_length == 0
            || max_length > MAX_MESSAGE_LENGTH_CEILING
            || max_length <= overhead
        {
            DEFAULT_MAX_MESSAGE_LENGTH
        } else {
            max_length
        };
        Self { max_length }
    }

    /// Returns the effective maximum fragment length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Splits `message` into fragments of at most `max_length` scalar
    /// values, with continuation markers applied.
    ///
    /// A message within the bound is returned unchanged as the single
    /// fragment, so splitting is idempotent over already-bounded fragments.
    pub fn split(&self, message: &str) -> Vec<String> {
        if char_len(message) <= self.max_length {
            return vec![message.to_owned()];
        }

        let mut pieces: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for line in message.split_inclusive('\n') {
            self.push_unit(&mut pieces, &mut current, &mut current_len, line, true);
        }
        if !current.is_empty() {
            pieces.push(current);
        }

        let last = pieces.len().saturating_sub(1);
        pieces
            .into_iter()
            .enumerate()
            .map(|(i, mut piece)| {
                if i > 0 {
                    piece.insert_str(0, CONTINUATION_PREFIX);
                }
                if i < last {
                    piece.push_str(CONTINUATION_SUFFIX);
                }
                piece
            })
            .collect()
    }

    /// Content budget for the piece currently being accumulated. Marker
    /// space is always reserved so no finished fragment can exceed the
    /// bound; the final fragment simply ends up shorter than it could be.
    fn budget(&self, pieces_so_far: usize) -> usize {
        let mut budget = self.max_length - char_len(CONTINUATION_SUFFIX);
        if pieces_so_far > 0 {
            budget -= char_len(CONTINUATION_PREFIX);
        }
        budget
    }

    /// Appends one unit (a line, then recursively a word) to the piece under
    /// construction, closing pieces as the budget fills up. Units that
    /// exceed an empty piece's budget are broken down: lines on word
    /// boundaries, words into fixed-size code-point chunks.
    fn push_unit(
        &self,
        pieces: &mut Vec<String>,
        current: &mut String,
        current_len: &mut usize,
        unit: &str,
        split_words: bool,
    ) {
        let unit_len = char_len(unit);

        if *current_len + unit_len <= self.budget(pieces.len()) {
            current.push_str(unit);
            *current_len += unit_len;
            return;
        }

        if !current.is_empty() {
            pieces.push(std::mem::take(current));
            *current_len = 0;
        }

        if unit_len <= self.budget(pieces.len()) {
            current.push_str(unit);
            *current_len = unit_len;
            return;
        }

        if split_words {
            for word in unit.split_inclusive(' ') {
                self.push_unit(pieces, current, current_len, word, false);
            }
            return;
        }

        // A single word longer than the budget: cut on code-point boundaries.
        let mut rest = unit;
        loop {
            let budget = self.budget(pieces.len());
            let rest_len = char_len(rest);
            if rest_len <= budget {
                current.push_str(rest);
                *current_len = rest_len;
                break;
            }
            let (head, tail) = split_at_char(rest, budget);
            pieces.push(head.to_owned());
            rest = tail;
        }
    }
}

/// Length in Unicode scalar values.
fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Combined marker length in scalar values.
fn marker_overhead() -> usize {
    char_len(CONTINUATION_PREFIX) + char_len(CONTINUATION_SUFFIX)
}

/// Splits `s` after `n` scalar values. `n` must be less than the char length
/// of `s`.
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let byte_idx = s
        .char_indices()
        .nth(n)
        .map_or(s.len(), |(idx, _)| idx);
    s.split_at(byte_idx)
}

/// Strips the continuation markers from a fragment, for reconstruction and
/// tests.
pub fn strip_markers(fragment: &str) -> &str {
    let fragment = fragment
        .strip_prefix(CONTINUATION_PREFIX)
        .unwrap_or(fragment);
    fragment
        .strip_suffix(CONTINUATION_SUFFIX)
        .unwrap_or(fragment)
}
