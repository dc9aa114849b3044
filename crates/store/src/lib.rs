//! Document store: file-backed load and save
//!
//! The I/O boundary of the merge engine. [`load`] is "loose": a missing file
//! is a valid empty starting state, not an error. Every other failure
//! (unreadable file, malformed content) surfaces verbatim. [`save`] runs the
//! layout pass first and only touches the filesystem once layout has
//! succeeded, then truncates and rewrites the whole file.
//!
//! Callers serialize access to a document externally; nothing here blocks
//! beyond the underlying storage medium.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use lamina_core::{Document, Result};
use lamina_syntax::{layout, parse_bytes, print};

/// Load a document from `path`, treating a missing file as empty
///
/// # Errors
///
/// Returns [`lamina_core::Error::Io`] when the file exists but cannot be
/// read, and [`lamina_core::Error::Syntax`] when its content is malformed.
/// "File does not exist" is the one condition recovered locally.
///
/// # Examples
///
/// ```no_run
/// let doc = lamina_store::load("service.conf")?;
/// # Ok::<(), lamina_core::Error>(())
/// ```
pub fn load(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "file absent, starting from an empty document");
            return Ok(Document::new());
        }
        Err(e) => return Err(e.into()),
    };
    let document = parse_bytes(&bytes)?;
    debug!(
        path = %path.display(),
        entries = document.len(),
        "loaded document"
    );
    Ok(document)
}

/// Lay out and save a document to `path`
///
/// Runs the layout pass, then creates or truncates the file and writes the
/// printed bytes. Truncate-then-write, not atomic-rename. The file is opened
/// only after layout succeeds, so a layout failure leaves it untouched.
///
/// # Errors
///
/// Returns [`lamina_core::Error::Syntax`] when the layout pass fails and
/// [`lamina_core::Error::Io`] when the file cannot be written.
pub fn save(path: impl AsRef<Path>, document: &mut Document) -> Result<()> {
    let path = path.as_ref();
    layout(document)?;
    fs::write(path, print(document))?;
    debug!(
        path = %path.display(),
        entries = document.len(),
        "saved document"
    );
    Ok(())
}
