//! Result types returned by a generation run.

use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of one [`crate::convert::generate`] call.
///
/// Always returned, never an error: skipped batches and failed documents are
/// described here and in the build log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub status: GenerationStatus,
    /// One entry per discovered document, in discovery order.
    pub documents: Vec<DocumentResult>,
    /// Path of the combined file, when it was written.
    pub combined_path: Option<PathBuf>,
    /// Why the combined file could not be written, if it could not.
    pub combined_error: Option<String>,
    pub stats: GenerationStats,
}

impl GenerationReport {
    pub(crate) fn skipped(status: GenerationStatus) -> Self {
        Self {
            status,
            documents: Vec::new(),
            combined_path: None,
            combined_error: None,
            stats: GenerationStats::default(),
        }
    }

    /// Markdown files written by this run, in discovery order.
    pub fn generated_files(&self) -> Vec<&Path> {
        self.documents
            .iter()
            .filter_map(|d| d.output.as_deref())
            .collect()
    }

    /// Documents that were skipped, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentError> {
        self.documents.iter().filter_map(|d| d.error.as_ref())
    }

    pub fn is_skipped(&self) -> bool {
        !matches!(self.status, GenerationStatus::Completed)
    }
}

/// Whether the batch ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationStatus {
    /// Every discovered document was attempted.
    Completed,
    /// The documentation build failed; nothing was touched.
    SkippedBuildFailed { reason: String },
    /// The build did not produce an HTML tree; nothing was touched.
    SkippedNotHtml { builder: String },
}

/// Result for a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    /// The HTML file.
    pub source: PathBuf,
    /// The Markdown file, when it was written.
    pub output: Option<PathBuf>,
    /// Byte length of the generated Markdown (0 on failure).
    pub markdown_len: usize,
    /// Set when the document was skipped.
    pub error: Option<DocumentError>,
}

impl DocumentResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.output.is_some()
    }
}

/// Aggregate counters for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub discovered: usize,
    pub generated: usize,
    pub failed: usize,
    /// Bytes written to the combined file (0 when not written).
    pub combined_bytes: usize,
    pub total_duration_ms: u64,
}
