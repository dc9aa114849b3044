//! Core document model for lamina
//!
//! This crate defines the foundational types of the merge engine:
//! - KeyPath / KeySegment: structural entry identity
//! - AnnotationGroup: comment lines attached to entries, with the union rule
//! - Node / Scalar: value subtrees
//! - Entry / Body / Document: the ordered document model and its
//!   insert-or-replace, filter, and typed set/get operations
//! - codec: the serde-based typed-value boundary
//! - Error: error type hierarchy
//!
//! Parsing and printing live in `lamina-syntax`; file I/O lives in
//! `lamina-store`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotations;
pub mod codec;
pub mod document;
pub mod error;
pub mod key;
pub mod node;

// Re-export commonly used types
pub use annotations::{merge_annotations, AnnotationGroup};
pub use document::{Body, Document, Entry, Marker};
pub use error::{CodecError, Error, Result, SyntaxError};
pub use key::{KeyPath, KeySegment};
pub use node::{Node, Scalar};
