//! # docs2llms
//!
//! Turn a generated HTML documentation tree into Markdown for LLM tooling:
//! one `.md` file beside every page, plus a combined `llms.txt`.
//!
//! ## Why regex rewriting?
//!
//! Documentation generators emit regular, predictable markup. A short,
//! ordered list of substitutions recovers headings, paragraphs, links,
//! emphasis, lists and code, and everything else collapses to plain text.
//! The converter is not an HTML parser; its quirks on nested or
//! malformed markup are part of its output format.
//!
//! ## Pipeline Overview
//!
//! ```text
//! build/html/
//!  │
//!  ├─ 1. Gate      skip if the build failed or was not an HTML build
//!  ├─ 2. Discover  walk for *.html (filesystem order)
//!  ├─ 3. Rewrite   22 ordered regex rules (strip, translate, strip tags)
//!  ├─ 4. Polish    decode entities, collapse blank lines, trim
//!  ├─ 5. Write     foo.html → foo.html.md (failures skipped, logged)
//!  └─ 6. Combine   llms.txt with a "# foo.html.md" section per file
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docs2llms::{generate, BuildOutcome, BuilderKind, GenerationConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GenerationConfig::default();
//!     let report = generate("docs/_build/html", &BuildOutcome::Success, &BuilderKind::Html, &config).await;
//!     eprintln!(
//!         "{} of {} pages converted",
//!         report.stats.generated, report.stats.discovered
//!     );
//! }
//! ```
//!
//! For a single page, [`html_to_markdown`] is a plain function:
//!
//! ```rust
//! assert_eq!(docs2llms::html_to_markdown("<h1>Hi</h1>"), "# Hi");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docs2llms` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod log;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{BuildOutcome, BuilderKind, GenerationConfig, GenerationConfigBuilder};
pub use convert::{convert_file, convert_to_file, generate, generate_sync, html_to_markdown};
pub use document::Document;
pub use error::{DocumentError, Docs2LlmsError};
pub use log::{BuildLog, LogLevel, RecordingLog, SharedBuildLog, TracingLog};
pub use output::{DocumentResult, GenerationReport, GenerationStats, GenerationStatus};
pub use progress::{GenerationProgressCallback, NoopProgressCallback, ProgressCallback};
