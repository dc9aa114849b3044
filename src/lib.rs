//! Lamina - comment-preserving configuration document merge engine
//!
//! Lamina keeps an ordered, keyed tree of configuration entries (a document
//! model) in sync with typed Rust values, while preserving human-authored
//! comments and insertion order across repeated load/modify/save cycles.
//!
//! # Quick Start
//!
//! ```no_run
//! use lamina::{load, save, Document};
//!
//! // Missing files are a valid empty starting state
//! let mut doc = load("service.conf")?;
//!
//! // Merge a typed value in; comments on unchanged keys survive
//! doc.set("retries", &3)?;
//!
//! // Layout runs first, then the file is rewritten
//! save("service.conf", &mut doc)?;
//! # Ok::<(), lamina::Error>(())
//! ```
//!
//! # Architecture
//!
//! The document model and merge semantics live in `lamina-core`; parsing,
//! layout, and printing in `lamina-syntax`; file-backed loose load and save
//! in `lamina-store`. This crate re-exports the public surface of all three.

pub use lamina_core::{
    merge_annotations, AnnotationGroup, Body, CodecError, Document, Entry, Error, KeyPath,
    KeySegment, Marker, Node, Result, Scalar, SyntaxError,
};
pub use lamina_store::{load, save};
pub use lamina_syntax::{layout, parse, parse_bytes, print, write_to};
