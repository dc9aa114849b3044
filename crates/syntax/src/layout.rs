//! Layout pass: assign deterministic formatting markers before printing
//!
//! A pure tree walk, invoked explicitly by save (never as a hidden side
//! effect of mutation). Each body indents its entries two spaces per nesting
//! level and aligns their `=` signs one column past the widest scalar key in
//! that body. Markers the parser captured from source are overwritten, so
//! repeated load/modify/save cycles converge to one canonical layout.

use lamina_core::{Body, Document, Marker, Node, SyntaxError};

use crate::printer::render_key;

/// Indentation step per nesting level
pub const INDENT_WIDTH: usize = 2;

/// Maximum nesting depth the layout pass will walk
///
/// Prevents stack overflow on pathological trees; matches the depth no
/// sane configuration file approaches.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Assign layout markers to every entry in the document
///
/// # Errors
///
/// Fails with a [`SyntaxError`] when nesting exceeds [`MAX_NESTING_DEPTH`].
pub fn layout(document: &mut Document) -> Result<(), SyntaxError> {
    layout_body(document.body_mut(), 0)
}

fn layout_body(body: &mut Body, depth: usize) -> Result<(), SyntaxError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(SyntaxError::new(
            0,
            0,
            format!("nesting depth exceeds {MAX_NESTING_DEPTH}"),
        ));
    }
    let indent = depth * INDENT_WIDTH;
    let widest = body
        .entries()
        .iter()
        .filter(|e| !e.value.is_object())
        .map(|e| render_key(&e.key).chars().count())
        .max()
        .unwrap_or(0);
    for entry in body.entries_mut() {
        entry.assign = if entry.value.is_object() {
            Marker { indent, align: 0 }
        } else {
            Marker {
                indent,
                align: indent + widest + 1,
            }
        };
        layout_value(&mut entry.value, depth)?;
    }
    Ok(())
}

fn layout_value(node: &mut Node, depth: usize) -> Result<(), SyntaxError> {
    match node {
        Node::Object(body) => layout_body(body, depth + 1),
        Node::List(items) => {
            for item in items {
                layout_value(item, depth)?;
            }
            Ok(())
        }
        Node::Scalar(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use lamina_core::{Entry, KeyPath};

    #[test]
    fn test_top_level_starts_at_zero_indent() {
        let mut doc = parse("    a = 1\n").unwrap();
        layout(&mut doc).unwrap();
        assert_eq!(doc.entries()[0].assign, Marker { indent: 0, align: 2 });
    }

    #[test]
    fn test_nested_bodies_indent_by_two() {
        let mut doc = parse("outer {\ninner {\nleaf = 1\n}\n}\n").unwrap();
        layout(&mut doc).unwrap();
        let outer = doc.entries()[0].value.as_object().unwrap();
        assert_eq!(outer.entries()[0].assign.indent, 2);
        let inner = outer.entries()[0].value.as_object().unwrap();
        assert_eq!(inner.entries()[0].assign.indent, 4);
    }

    #[test]
    fn test_alignment_spans_widest_key_per_body() {
        let mut doc = parse("a = 1\nlong_key = 2\nblock {\nx = 3\n}\n").unwrap();
        layout(&mut doc).unwrap();
        // "long_key" is 8 wide; block entries don't participate
        assert_eq!(doc.entries()[0].assign.align, 9);
        assert_eq!(doc.entries()[1].assign.align, 9);
        assert_eq!(doc.entries()[2].assign, Marker { indent: 0, align: 0 });
        let block = doc.entries()[2].value.as_object().unwrap();
        assert_eq!(block.entries()[0].assign, Marker { indent: 2, align: 4 });
    }

    #[test]
    fn test_objects_inside_lists_are_walked() {
        let mut doc = parse("items = [{ a = 1 }]\n").unwrap();
        layout(&mut doc).unwrap();
        let Node::List(items) = &doc.entries()[0].value else {
            panic!("expected list");
        };
        let body = items[0].as_object().unwrap();
        assert_eq!(body.entries()[0].assign.indent, 2);
    }

    #[test]
    fn test_depth_guard() {
        let mut doc = Document::new();
        let mut node = Node::Object(Body::new());
        for _ in 0..(MAX_NESTING_DEPTH + 1) {
            let mut body = Body::new();
            body.push(Entry::new(KeyPath::ident("n"), node));
            node = Node::Object(body);
        }
        doc.put(Entry::new(KeyPath::ident("root"), node));
        assert!(layout(&mut doc).is_err());
    }
}
