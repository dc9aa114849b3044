//! Document model: ordered entries and merge/query operations
//!
//! This module defines:
//! - Entry: one key-value binding with its annotations and layout marker
//! - Body: ordered entry sequence, shared by the document root and nested
//!   objects
//! - Document: the top-level model with typed `set`/`get` operations
//!
//! ## Merge semantics
//!
//! [`Body::put`] is the single write path. On a structural key match it
//! replaces the value wholesale, unions annotations (old lines first, new
//! lines appended, exact-text dedup), and keeps the entry's position. With no
//! match it appends at the end. Within a document no two entries share a
//! structurally equal key path; `put` maintains this by construction.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::annotations::{merge_annotations, AnnotationGroup};
use crate::codec;
use crate::error::{Error, Result};
use crate::key::KeyPath;
use crate::node::Node;

/// Layout metadata for one entry
///
/// Assigned by the pre-serialization layout pass and carried through `put`
/// replacement unchanged from the incoming entry. Columns are 0-based offsets
/// from the start of the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marker {
    /// Number of indentation spaces before the key
    pub indent: usize,
    /// Column of the `=` sign; 0 for unaligned or block entries
    pub align: usize,
}

/// One key-value binding with its annotations
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Identifying key path
    pub key: KeyPath,
    /// The value subtree
    pub value: Node,
    /// Comment lines immediately above the entry
    pub lead_comment: Option<AnnotationGroup>,
    /// Comment after the value, on the same line
    pub line_comment: Option<AnnotationGroup>,
    /// Layout metadata
    pub assign: Marker,
}

impl Entry {
    /// Create an entry with no annotations and a default marker
    pub fn new(key: impl Into<KeyPath>, value: impl Into<Node>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            lead_comment: None,
            line_comment: None,
            assign: Marker::default(),
        }
    }

    /// Attach a lead comment group
    pub fn with_lead_comment(mut self, group: AnnotationGroup) -> Self {
        self.lead_comment = Some(group);
        self
    }

    /// Attach a line comment group
    pub fn with_line_comment(mut self, group: AnnotationGroup) -> Self {
        self.line_comment = Some(group);
        self
    }
}

/// Ordered entry sequence
///
/// Serves both as the document root and as the payload of [`Node::Object`].
/// Order is significant: it directly determines serialized output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    entries: Vec<Entry>,
}

impl Body {
    /// Create an empty body
    pub fn new() -> Self {
        Self::default()
    }

    /// The entries in order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The entries in order, mutable
    ///
    /// Mutation through this slice bypasses the key-uniqueness maintenance
    /// that [`Body::put`] provides; it exists for the layout pass and for
    /// parser construction.
    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    /// Append an entry without key matching
    ///
    /// Used by the parser, which trusts the source text. Application writes
    /// go through [`Body::put`].
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Insert-or-replace keyed by structural key equality
    ///
    /// Scans linearly; on the first key match the matched entry keeps its
    /// position, takes the incoming marker and value wholesale, and unions
    /// both annotation groups (existing lines first). With no match the
    /// incoming entry is appended. Total; mutates in place.
    pub fn put(&mut self, entry: Entry) {
        match self.entries.iter().position(|e| e.key.matches(&entry.key)) {
            Some(idx) => {
                let existing = &mut self.entries[idx];
                existing.assign = entry.assign;
                existing.lead_comment =
                    merge_annotations(existing.lead_comment.as_ref(), entry.lead_comment.as_ref());
                existing.line_comment =
                    merge_annotations(existing.line_comment.as_ref(), entry.line_comment.as_ref());
                existing.value = entry.value;
            }
            None => self.entries.push(entry),
        }
    }

    /// Entries whose leading key segment matches `key` exactly
    ///
    /// Matching is on the first segment only, so block entries that share a
    /// leading token (`section "a"`, `section "b"`) both match the query
    /// `section`. [`Document::get`] reports that situation as ambiguous.
    pub fn filter<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Entry> {
        self.entries
            .iter()
            .filter(move |e| e.key.first().map_or(false, |s| s.text() == key))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the body holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the entries
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl IntoIterator for Body {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Body {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Entry> for Body {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A configuration document
///
/// An ordered entry sequence plus the typed-value operations. Created empty
/// or by parsing source text; mutated in place; serialized by the syntax
/// layer.
///
/// # Examples
///
/// ```
/// use lamina_core::Document;
///
/// let mut doc = Document::new();
/// doc.set("retries", &3)?;
/// assert!(doc.contains("retries"));
/// assert_eq!(doc.get::<i64>("retries")?, 3);
/// # Ok::<(), lamina_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    body: Body,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-built body (parser entry point)
    pub fn from_body(body: Body) -> Self {
        Self { body }
    }

    /// The document's entry sequence
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The document's entry sequence, mutable
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Insert-or-replace one entry; see [`Body::put`]
    pub fn put(&mut self, entry: Entry) {
        self.body.put(entry);
    }

    /// Encode `value` and merge it under `key`
    ///
    /// Fails with [`Error::EmptyKey`] on an empty key and propagates codec
    /// failures verbatim. Encoding runs fully before any mutation, so a
    /// failed `set` leaves the document untouched.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        let node = codec::encode(value)?;
        self.body.put(Entry::new(KeyPath::ident(key), node));
        Ok(())
    }

    /// Decode the single entry matching `key`
    ///
    /// Fails with [`Error::EmptyKey`] on an empty key, [`Error::NotFound`]
    /// when nothing matches, and [`Error::AmbiguousKey`] when more than one
    /// entry matches (an invariant violation this method defends against
    /// rather than resolving).
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        let mut matched = self.body.filter(key);
        let entry = match matched.next() {
            None => {
                return Err(Error::NotFound {
                    key: key.to_string(),
                })
            }
            Some(entry) => entry,
        };
        let rest = matched.count();
        if rest > 0 {
            return Err(Error::AmbiguousKey {
                key: key.to_string(),
                count: rest + 1,
            });
        }
        Ok(codec::decode(&entry.value)?)
    }

    /// Decode the entire document into one aggregate value
    pub fn get_all<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(codec::decode_body(&self.body)?)
    }

    /// Encode `value` and merge each of its top-level fields independently
    ///
    /// Fails with [`Error::TypeMismatch`] when the encoded node is not an
    /// object. Each produced entry goes through [`Body::put`] on its own, so
    /// existing keys absent from `value` are left untouched.
    pub fn set_all<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let node = codec::encode(value)?;
        let Node::Object(incoming) = node else {
            return Err(Error::TypeMismatch);
        };
        for entry in incoming {
            self.body.put(entry);
        }
        Ok(())
    }

    /// Whether at least one entry matches `key`
    pub fn contains(&self, key: &str) -> bool {
        self.body.filter(key).next().is_some()
    }

    /// The entries in order
    pub fn entries(&self) -> &[Entry] {
        self.body.entries()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the document holds no entries
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeySegment;

    fn entry(key: &str, value: i64) -> Entry {
        Entry::new(key, value)
    }

    // ====================================================================
    // put semantics
    // ====================================================================

    #[test]
    fn test_put_appends_new_keys_in_order() {
        let mut body = Body::new();
        body.put(entry("a", 1));
        body.put(entry("b", 2));
        let keys: Vec<_> = body.iter().map(|e| e.key.joined()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn test_put_is_idempotent() {
        let mut body = Body::new();
        body.put(entry("a", 1));
        body.put(entry("a", 1));
        assert_eq!(body.len(), 1);
        assert_eq!(body.entries()[0].value, Node::from(1i64));
    }

    #[test]
    fn test_put_replace_preserves_position() {
        let mut body = Body::new();
        body.put(entry("a", 1));
        body.put(entry("b", 2));
        body.put(entry("a", 3));
        assert_eq!(body.len(), 2);
        assert_eq!(body.entries()[0].key.joined(), "a");
        assert_eq!(body.entries()[0].value, Node::from(3i64));
        assert_eq!(body.entries()[1].key.joined(), "b");
    }

    #[test]
    fn test_put_replace_unions_lead_comments() {
        let mut body = Body::new();
        body.put(entry("a", 1).with_lead_comment(AnnotationGroup::from_lines(["# old"])));
        body.put(entry("a", 2).with_lead_comment(AnnotationGroup::from_lines(["# new"])));
        let lead = body.entries()[0].lead_comment.as_ref().unwrap();
        assert_eq!(lead.lines(), ["# old", "# new"]);
    }

    #[test]
    fn test_put_replace_keeps_old_comment_when_incoming_has_none() {
        let mut body = Body::new();
        body.put(entry("a", 1).with_line_comment(AnnotationGroup::from_lines(["# keep"])));
        body.put(entry("a", 2));
        let line = body.entries()[0].line_comment.as_ref().unwrap();
        assert_eq!(line.lines(), ["# keep"]);
        assert_eq!(body.entries()[0].value, Node::from(2i64));
    }

    #[test]
    fn test_put_replace_takes_incoming_marker() {
        let mut body = Body::new();
        let mut first = entry("a", 1);
        first.assign = Marker {
            indent: 4,
            align: 10,
        };
        body.put(first);
        let mut second = entry("a", 2);
        second.assign = Marker { indent: 0, align: 2 };
        body.put(second);
        assert_eq!(body.entries()[0].assign, Marker { indent: 0, align: 2 });
    }

    #[test]
    fn test_put_matches_multi_segment_keys_structurally() {
        let block = |name: &str, value: i64| {
            Entry::new(
                KeyPath::new(vec![
                    KeySegment::ident("section"),
                    KeySegment::quoted(name),
                ]),
                value,
            )
        };
        let mut body = Body::new();
        body.put(block("a", 1));
        body.put(block("b", 2));
        body.put(block("a", 3));
        assert_eq!(body.len(), 2);
        assert_eq!(body.entries()[0].value, Node::from(3i64));
    }

    // ====================================================================
    // typed operations
    // ====================================================================

    #[test]
    fn test_set_then_get_round_trips() {
        let mut doc = Document::new();
        doc.set("retries", &3i64).unwrap();
        assert_eq!(doc.get::<i64>("retries").unwrap(), 3);
    }

    #[test]
    fn test_set_rejects_empty_key() {
        let mut doc = Document::new();
        assert!(matches!(doc.set("", &1i64), Err(Error::EmptyKey)));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_get_rejects_empty_key() {
        let doc = Document::new();
        assert!(matches!(doc.get::<i64>(""), Err(Error::EmptyKey)));
    }

    #[test]
    fn test_get_missing_key_is_not_found() {
        let doc = Document::new();
        assert!(matches!(
            doc.get::<i64>("absent"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_get_duplicate_key_is_ambiguous() {
        // Bypass put to simulate a corrupted document.
        let mut body = Body::new();
        body.push(entry("dup", 1));
        body.push(entry("dup", 2));
        let doc = Document::from_body(body);
        match doc.get::<i64>("dup") {
            Err(Error::AmbiguousKey { key, count }) => {
                assert_eq!(key, "dup");
                assert_eq!(count, 2);
            }
            other => panic!("expected AmbiguousKey, got {other:?}"),
        }
    }

    #[test]
    fn test_set_all_merges_fields_independently() {
        #[derive(serde::Serialize)]
        struct Patch {
            b: i64,
            c: i64,
        }

        let mut doc = Document::new();
        doc.set("a", &1i64).unwrap();
        doc.set("b", &2i64).unwrap();
        doc.set_all(&Patch { b: 20, c: 30 }).unwrap();

        let keys: Vec<_> = doc.entries().iter().map(|e| e.key.joined()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(doc.get::<i64>("a").unwrap(), 1);
        assert_eq!(doc.get::<i64>("b").unwrap(), 20);
        assert_eq!(doc.get::<i64>("c").unwrap(), 30);
    }

    #[test]
    fn test_set_all_rejects_non_object_values() {
        let mut doc = Document::new();
        assert!(matches!(doc.set_all(&5i64), Err(Error::TypeMismatch)));
        assert!(matches!(
            doc.set_all(&vec![1i64, 2]),
            Err(Error::TypeMismatch)
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_get_all_decodes_whole_document() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Config {
            host: String,
            port: i64,
        }

        let mut doc = Document::new();
        doc.set("host", "localhost").unwrap();
        doc.set("port", &8080i64).unwrap();
        let config: Config = doc.get_all().unwrap();
        assert_eq!(
            config,
            Config {
                host: "localhost".to_string(),
                port: 8080
            }
        );
    }

    #[test]
    fn test_contains() {
        let mut doc = Document::new();
        doc.set("present", &1i64).unwrap();
        assert!(doc.contains("present"));
        assert!(!doc.contains("absent"));
        assert!(!doc.contains(""));
    }

    #[test]
    fn test_filter_matches_leading_segment() {
        let mut body = Body::new();
        body.push(Entry::new(
            KeyPath::new(vec![
                KeySegment::ident("section"),
                KeySegment::quoted("a"),
            ]),
            Node::Object(Body::new()),
        ));
        body.push(Entry::new(
            KeyPath::new(vec![
                KeySegment::ident("section"),
                KeySegment::quoted("b"),
            ]),
            Node::Object(Body::new()),
        ));
        let doc = Document::from_body(body);
        assert!(doc.contains("section"));
        assert!(matches!(
            doc.get::<i64>("section"),
            Err(Error::AmbiguousKey { count: 2, .. })
        ));
    }
}
