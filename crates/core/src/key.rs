//! Key paths for document entries
//!
//! An entry is identified by a [`KeyPath`]: an ordered sequence of
//! [`KeySegment`]s. Scalar bindings (`retries = 3`) have a single segment;
//! block bindings (`section "primary" { ... }`) have one segment per key
//! token.
//!
//! ## Contract
//!
//! Key equality is structural and exact:
//! - Paths are equal iff they have the same length and every corresponding
//!   segment's literal text matches exactly, position-for-position.
//! - No normalization: no case-folding, no whitespace trimming.
//! - Whether a segment was quoted in source is formatting metadata and does
//!   not participate in equality.

use std::fmt;

/// One segment of a key path
///
/// Carries the literal text plus whether the segment was written as a quoted
/// string literal. Quoting affects rendering only, never identity.
#[derive(Debug, Clone, Eq)]
pub struct KeySegment {
    text: String,
    quoted: bool,
}

impl KeySegment {
    /// Create a bare identifier segment
    pub fn ident(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    /// Create a quoted string segment
    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }

    /// The segment's literal text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the segment was written as a quoted string literal
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

// Equality is over literal text only; the quoting flag is formatting.
impl PartialEq for KeySegment {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

/// Ordered sequence of segments naming an entry
///
/// # Examples
///
/// ```
/// use lamina_core::key::{KeyPath, KeySegment};
///
/// let single = KeyPath::ident("retries");
/// assert_eq!(single.len(), 1);
///
/// let block = KeyPath::new(vec![
///     KeySegment::ident("section"),
///     KeySegment::quoted("primary"),
/// ]);
/// assert!(!block.matches(&single));
/// assert!(block.matches(&block.clone()));
/// ```
#[derive(Debug, Clone, Default, Eq)]
pub struct KeyPath {
    segments: Vec<KeySegment>,
}

impl KeyPath {
    /// Create a path from its segments
    pub fn new(segments: Vec<KeySegment>) -> Self {
        Self { segments }
    }

    /// Create a single-segment path from a bare identifier
    pub fn ident(text: impl Into<String>) -> Self {
        Self {
            segments: vec![KeySegment::ident(text)],
        }
    }

    /// The path's segments in order
    pub fn segments(&self) -> &[KeySegment] {
        &self.segments
    }

    /// The leading segment, if the path is non-empty
    pub fn first(&self) -> Option<&KeySegment> {
        self.segments.first()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Structural key equality
    ///
    /// True iff both paths have the same length and every corresponding
    /// segment's text matches exactly. Pure and total.
    pub fn matches(&self, other: &KeyPath) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(l, r)| l.text == r.text)
    }

    /// Segment texts joined with `.`, for error messages and codec keys
    pub fn joined(&self) -> String {
        self.segments
            .iter()
            .map(KeySegment::text)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl PartialEq for KeyPath {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<&str> for KeyPath {
    fn from(text: &str) -> Self {
        KeyPath::ident(text)
    }
}
