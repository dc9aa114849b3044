//! Printer: document model to formatted text
//!
//! Serializes using the markers on each entry (indentation, `=` alignment)
//! that the layout pass assigns, or that the parser captured from source.
//! Lead comment lines print above the entry at its indent; line comments
//! print after the value, space-joined when the group holds several lines.

use std::io;

use lamina_core::{Body, Document, Entry, KeyPath, Node, Scalar};

/// Render a document to text
///
/// Output ends with a trailing newline unless the document is empty.
pub fn print(document: &Document) -> String {
    let mut out = String::new();
    print_body(&mut out, document.body());
    out
}

/// Render a document and write it out
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_to<W: io::Write>(writer: &mut W, document: &Document) -> io::Result<()> {
    writer.write_all(print(document).as_bytes())
}

fn print_body(out: &mut String, body: &Body) {
    for entry in body {
        print_entry(out, entry);
    }
}

fn print_entry(out: &mut String, entry: &Entry) {
    let indent = " ".repeat(entry.assign.indent);
    if let Some(lead) = &entry.lead_comment {
        for comment in lead.lines() {
            out.push_str(&indent);
            out.push_str(comment);
            out.push('\n');
        }
    }

    let mut line = String::new();
    line.push_str(&indent);
    line.push_str(&render_key(&entry.key));
    match &entry.value {
        Node::Object(nested) => {
            line.push(' ');
            line.push_str(&render_block(nested, entry.assign.indent));
        }
        value => {
            let width = line.chars().count();
            if entry.assign.align > width {
                for _ in width..entry.assign.align {
                    line.push(' ');
                }
            } else {
                line.push(' ');
            }
            line.push_str("= ");
            line.push_str(&render_value(value, entry.assign.indent));
        }
    }
    if let Some(comments) = &entry.line_comment {
        line.push_str("  ");
        line.push_str(&comments.lines().join(" "));
    }
    out.push_str(&line);
    out.push('\n');
}

/// Rendered form of a key path: segments space-joined, quoted ones escaped
pub(crate) fn render_key(key: &KeyPath) -> String {
    key.segments()
        .iter()
        .map(|segment| {
            if segment.is_quoted() {
                format!("\"{}\"", escape_string(segment.text()))
            } else {
                segment.text().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_value(node: &Node, indent: usize) -> String {
    match node {
        Node::Scalar(scalar) => render_scalar(scalar),
        Node::List(items) => {
            let rendered: Vec<_> = items
                .iter()
                .map(|item| render_value(item, indent))
                .collect();
            format!("[{}]", rendered.join(", "))
        }
        Node::Object(body) => render_block(body, indent),
    }
}

fn render_block(body: &Body, indent: usize) -> String {
    if body.is_empty() {
        return "{}".to_string();
    }
    let mut out = String::from("{\n");
    print_body(&mut out, body);
    out.push_str(&" ".repeat(indent));
    out.push('}');
    out
}

fn render_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => render_float(*f),
        Scalar::String(s) => format!("\"{}\"", escape_string(s)),
    }
}

/// Floats print so they re-parse as floats: integral values keep a `.0`.
/// Non-finite values have no source form and print as null.
fn render_float(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        format!("{f:?}")
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
