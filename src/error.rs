//! Error types for the docs2llms library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Docs2LlmsError`] — **Fatal**: the requested operation cannot proceed
//!   at all (bad configuration, missing input file for a single-file
//!   conversion). Only returned by APIs that have a caller to hand it to.
//!
//! * [`DocumentError`] — **Non-fatal**: a single document failed to read,
//!   convert or write, but the rest of the batch is fine. Stored inside
//!   [`crate::output::DocumentResult`] and logged as a warning; the batch
//!   entry point [`crate::convert::generate`] never returns an error.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the docs2llms library.
///
/// Per-document failures use [`DocumentError`] and are stored in
/// [`crate::output::DocumentResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Docs2LlmsError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file or directory was not found at the given path.
    #[error("Input not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the input.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input exists but could not be read as UTF-8 text.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Docs2LlmsError {
    /// Map an I/O error raised while reading `path` to the closest variant.
    pub(crate) fn from_read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Docs2LlmsError::InputNotFound { path },
            std::io::ErrorKind::PermissionDenied => Docs2LlmsError::PermissionDenied { path },
            _ => Docs2LlmsError::ReadFailed { path, source: err },
        }
    }
}

/// A non-fatal error for a single document.
///
/// Stored alongside [`crate::output::DocumentResult`] when a document is
/// skipped. The batch continues with the remaining documents.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum DocumentError {
    /// The HTML file could not be read (missing, unreadable, not UTF-8).
    #[error("Failed to read '{path}': {detail}")]
    ReadFailed { path: PathBuf, detail: String },

    /// The conversion task did not complete (panicked or was cancelled).
    #[error("Failed to convert '{path}': {detail}")]
    ConvertFailed { path: PathBuf, detail: String },

    /// The Markdown output could not be written next to its source.
    #[error("Failed to write '{path}': {detail}")]
    WriteFailed { path: PathBuf, detail: String },
}

impl DocumentError {
    /// Path of the file the failing operation touched.
    pub fn path(&self) -> &std::path::Path {
        match self {
            DocumentError::ReadFailed { path, .. }
            | DocumentError::ConvertFailed { path, .. }
            | DocumentError::WriteFailed { path, .. } => path,
        }
    }
}
