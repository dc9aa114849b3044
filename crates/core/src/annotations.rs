//! Comment annotations attached to entries
//!
//! Each entry carries up to two [`AnnotationGroup`]s: the lead group (comment
//! lines immediately above the entry) and the line group (a comment after the
//! value on the same line). Groups store each comment line verbatim, marker
//! included (`"# retries"`).
//!
//! [`merge_annotations`] implements the union rule used when a replacement
//! entry lands on an existing key: the old group's lines stay in place and in
//! order, and lines from the new group are appended unless an exact-text
//! duplicate already exists.

/// Ordered group of distinct comment lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationGroup {
    lines: Vec<String>,
}

impl AnnotationGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group from comment lines, dropping exact-text duplicates
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut group = Self::new();
        for line in lines {
            group.push(line);
        }
        group
    }

    /// Append a comment line unless an exact-text duplicate is present
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !self.contains(&line) {
            self.lines.push(line);
        }
    }

    /// The group's comment lines in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the group holds a line with exactly this text
    pub fn contains(&self, text: &str) -> bool {
        self.lines.iter().any(|l| l == text)
    }

    /// Number of comment lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the group holds no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Union two optional annotation groups
///
/// - `a` absent yields a clone of `b` (including absent); `b` absent yields a
///   clone of `a`.
/// - Otherwise the result starts from `a`'s lines in original order, then
///   appends each of `b`'s lines that is not already present by exact text.
///
/// The result never aliases either input. Deterministic, order-preserving,
/// idempotent.
///
/// # Examples
///
/// ```
/// use lamina_core::annotations::{merge_annotations, AnnotationGroup};
///
/// let old = AnnotationGroup::from_lines(["# x", "# y"]);
/// let new = AnnotationGroup::from_lines(["# y", "# z"]);
/// let merged = merge_annotations(Some(&old), Some(&new)).unwrap();
/// assert_eq!(merged.lines(), ["# x", "# y", "# z"]);
/// ```
pub fn merge_annotations(
    a: Option<&AnnotationGroup>,
    b: Option<&AnnotationGroup>,
) -> Option<AnnotationGroup> {
    match (a, b) {
        (None, b) => b.cloned(),
        (a, None) => a.cloned(),
        (Some(a), Some(b)) => {
            let mut merged = a.clone();
            for line in b.lines() {
                merged.push(line.clone());
            }
            Some(merged)
        }
    }
}
