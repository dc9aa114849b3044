//! Text syntax for lamina documents
//!
//! This crate is the parse/print boundary around the document model:
//! - lexer + parser: source text to [`lamina_core::Document`], preserving
//!   order, comments, and source alignment markers
//! - layout: the explicit pre-serialization pass assigning canonical
//!   indentation and alignment
//! - printer: document model back to formatted text
//!
//! The surface is HCL-shaped: `key = value` assignments, `section "name"
//! { ... }` blocks with multi-segment keys, `#` and `//` comments, strings,
//! integers, floats, booleans, null, lists, and nested objects.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod layout;
mod lexer;
mod parser;
mod printer;

pub use layout::{layout, INDENT_WIDTH, MAX_NESTING_DEPTH};
pub use parser::{parse, parse_bytes};
pub use printer::{print, write_to};
