//! Conversion entry points.
//!
//! * [`html_to_markdown`] — the pure converter: one HTML string in, one
//!   Markdown string out.
//! * [`convert_file`] / [`convert_to_file`] — a single page from disk.
//! * [`generate`] — the batch: every page under a build output directory,
//!   one `.md` sibling each, then the combined `llms.txt`.

use crate::config::{BuildOutcome, BuilderKind, GenerationConfig};
use crate::document::{display_name, Document};
use crate::error::{Docs2LlmsError, DocumentError};
use crate::output::{DocumentResult, GenerationReport, GenerationStats, GenerationStatus};
use crate::pipeline::aggregate::{self, Section};
use crate::pipeline::{discover, postprocess, rules};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Convert HTML text to Markdown.
///
/// Total and pure: never fails, keeps no state between calls, and returns
/// the same output for the same input. Constructs the rewrite rules do not
/// recognise are reduced to their text by the final tag strip.
///
/// # Example
/// ```rust
/// let md = docs2llms::html_to_markdown(r#"<h2>Usage</h2><p>Run <code>make</code>.</p>"#);
/// assert_eq!(md, "## UsageRun `make`.");
/// ```
pub fn html_to_markdown(html: &str) -> String {
    let rewritten = rules::apply_rules(html);
    postprocess::clean_markdown(&rewritten)
}

/// Read one HTML file and return its Markdown.
pub async fn convert_file(input: impl AsRef<Path>) -> Result<String, Docs2LlmsError> {
    let document = Document::read(input).await?;
    Ok(document.to_markdown())
}

/// Convert one HTML file and write the Markdown to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
/// Returns the number of bytes written.
pub async fn convert_to_file(
    input: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<usize, Docs2LlmsError> {
    let markdown = convert_file(input).await?;
    aggregate::write_atomic(output_path.as_ref(), &markdown).await?;
    Ok(markdown.len())
}

/// Generate Markdown for every document under `output_dir`, then the
/// combined file.
///
/// Nothing is touched when `outcome` is a failure (logged as a warning) or
/// when `builder` is not [`BuilderKind::Html`] (logged as info). Otherwise
/// each discovered document is read, converted and written to its sibling
/// `<name><suffix>` file; a document that fails at any step is skipped with
/// a warning and left out of the combined file. The combined file is written
/// once every document has been attempted.
///
/// Never returns an error: the [`GenerationReport`] and the configured
/// [`crate::log::BuildLog`] describe everything that went wrong.
pub async fn generate(
    output_dir: impl AsRef<Path>,
    outcome: &BuildOutcome,
    builder: &BuilderKind,
    config: &GenerationConfig,
) -> GenerationReport {
    let total_start = Instant::now();
    let root = output_dir.as_ref();
    let log = &config.log;

    // ── Step 1: Check the build verdict ──────────────────────────────────
    if let BuildOutcome::Failed(reason) = outcome {
        log.warning("Skipping markdown generation due to build error");
        return GenerationReport::skipped(GenerationStatus::SkippedBuildFailed {
            reason: reason.clone(),
        });
    }
    if *builder != BuilderKind::Html {
        log.info("Markdown generation only works with HTML builder");
        return GenerationReport::skipped(GenerationStatus::SkippedNotHtml {
            builder: builder.to_string(),
        });
    }

    log.info("Generating markdown files...");

    // ── Step 2: Discover documents ───────────────────────────────────────
    let sources = discover_blocking(root, config).await;
    let total = sources.len();
    if let Some(ref cb) = config.progress_callback {
        cb.on_generation_start(total);
    }

    // ── Step 3: Convert and write each document ──────────────────────────
    // `buffered` (not `buffer_unordered`) keeps results in discovery order.
    let processed: Vec<(DocumentResult, Option<String>)> = stream::iter(
        sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| process_document(source, index, total, config)),
    )
    .buffered(config.concurrency.max(1))
    .collect()
    .await;

    let generated = processed.iter().filter(|(r, _)| r.is_success()).count();
    log.info(&format!("Generated {generated} markdown files"));
    if let Some(ref cb) = config.progress_callback {
        cb.on_generation_complete(total, generated);
    }

    // ── Step 4: Combined file ────────────────────────────────────────────
    let mut combined_path = None;
    let mut combined_error = None;
    let mut combined_bytes = 0;

    if config.write_combined {
        let names: Vec<(String, &str)> = processed
            .iter()
            .filter_map(|(result, markdown)| match (&result.output, markdown) {
                (Some(output), Some(md)) => Some((display_name(output), md.as_str())),
                _ => None,
            })
            .collect();
        let sections: Vec<Section<'_>> = names
            .iter()
            .map(|(name, markdown)| Section {
                name: name.as_str(),
                markdown: *markdown,
            })
            .collect();
        let combined = aggregate::assemble_combined(&sections);
        let path = root.join(&config.combined_file_name);

        match aggregate::write_atomic(&path, &combined).await {
            Ok(()) => {
                log.info(&format!(
                    "Concatenated markdown files into: {}",
                    path.display()
                ));
                combined_bytes = combined.len();
                combined_path = Some(path);
            }
            Err(e) => {
                log.warning(&format!("Failed to write {}: {}", path.display(), e));
                combined_error = Some(e.to_string());
            }
        }
    }

    let documents: Vec<DocumentResult> = processed.into_iter().map(|(r, _)| r).collect();
    let stats = GenerationStats {
        discovered: total,
        generated,
        failed: total - generated,
        combined_bytes,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    debug!(
        discovered = stats.discovered,
        generated = stats.generated,
        failed = stats.failed,
        ms = stats.total_duration_ms,
        "Generation complete"
    );

    GenerationReport {
        status: GenerationStatus::Completed,
        documents,
        combined_path,
        combined_error,
        stats,
    }
}

/// Synchronous wrapper around [`generate`].
///
/// Creates a temporary tokio runtime internally; fails only if that runtime
/// cannot be created.
pub fn generate_sync(
    output_dir: impl AsRef<Path>,
    outcome: &BuildOutcome,
    builder: &BuilderKind,
    config: &GenerationConfig,
) -> Result<GenerationReport, Docs2LlmsError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Docs2LlmsError::Internal(format!("Failed to create tokio runtime: {}", e)))?;
    Ok(runtime.block_on(generate(output_dir, outcome, builder, config)))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Walk the output tree on the blocking pool.
async fn discover_blocking(root: &Path, config: &GenerationConfig) -> Vec<PathBuf> {
    let root_owned = root.to_path_buf();
    let extensions = config.extensions.clone();
    let sort_paths = config.sort_paths;
    match tokio::task::spawn_blocking(move || {
        discover::discover_documents(&root_owned, &extensions, sort_paths)
    })
    .await
    {
        Ok(found) => found,
        Err(e) => {
            config.log.warning(&format!(
                "Failed to scan {} for documents: {}",
                root.display(),
                e
            ));
            Vec::new()
        }
    }
}

/// Read, convert and write one document, reporting to the log and callback.
///
/// Returns the Markdown alongside the result so the combined file can be
/// assembled without reading the outputs back.
async fn process_document(
    source: PathBuf,
    index: usize,
    total: usize,
    config: &GenerationConfig,
) -> (DocumentResult, Option<String>) {
    if let Some(ref cb) = config.progress_callback {
        cb.on_document_start(&source, index, total);
    }
    let output = discover::markdown_path_for(&source, &config.markdown_suffix);

    match convert_and_write(&source, &output).await {
        Ok(markdown) => {
            config
                .log
                .info(&format!("Generated: {}", output.display()));
            if let Some(ref cb) = config.progress_callback {
                cb.on_document_complete(&source, index, total, markdown.len());
            }
            let result = DocumentResult {
                source,
                output: Some(output),
                markdown_len: markdown.len(),
                error: None,
            };
            (result, Some(markdown))
        }
        Err(err) => {
            config
                .log
                .warning(&format!("Failed to convert {}: {}", source.display(), err));
            if let Some(ref cb) = config.progress_callback {
                cb.on_document_error(&source, index, total, &err.to_string());
            }
            let result = DocumentResult {
                source,
                output: None,
                markdown_len: 0,
                error: Some(err),
            };
            (result, None)
        }
    }
}

async fn convert_and_write(source: &Path, output: &Path) -> Result<String, DocumentError> {
    let html = tokio::fs::read_to_string(source)
        .await
        .map_err(|e| DocumentError::ReadFailed {
            path: source.to_path_buf(),
            detail: e.to_string(),
        })?;

    // Regex work is CPU-bound; keep it off the async workers.
    let markdown = tokio::task::spawn_blocking(move || html_to_markdown(&html))
        .await
        .map_err(|e| DocumentError::ConvertFailed {
            path: source.to_path_buf(),
            detail: e.to_string(),
        })?;

    tokio::fs::write(output, &markdown)
        .await
        .map_err(|e| DocumentError::WriteFailed {
            path: output.to_path_buf(),
            detail: e.to_string(),
        })?;

    debug!(
        source = %source.display(),
        output = %output.display(),
        bytes = markdown.len(),
        "Document converted"
    );
    Ok(markdown)
}

// ── Tests ────────────────────────────────────────────────────────────────────
