//! Configuration types for a generation run.
//!
//! Everything a run can vary is held in [`GenerationConfig`], built via its
//! [`GenerationConfigBuilder`]. The build pipeline's verdict is passed
//! separately as [`BuildOutcome`] and [`BuilderKind`], since it describes the
//! input rather than how to process it.

use crate::error::Docs2LlmsError;
use crate::log::{SharedBuildLog, TracingLog};
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Configuration for a generation run.
///
/// Built via [`GenerationConfig::builder()`] or using
/// [`GenerationConfig::default()`].
///
/// # Example
/// ```rust
/// use docs2llms::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .combined_file_name("llms-full.txt")
///     .concurrency(8)
///     .sort_paths(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct GenerationConfig {
    /// Appended to each HTML file name to name its Markdown sibling. Default: `.md`.
    pub markdown_suffix: String,

    /// Name of the combined file written at the output root. Default: `llms.txt`.
    pub combined_file_name: String,

    /// Write the combined file after all documents. Default: true.
    pub write_combined: bool,

    /// File extensions (without dot, case-sensitive) treated as documents. Default: `["html"]`.
    pub extensions: Vec<String>,

    /// Sort discovered paths by file name. Default: false (filesystem order).
    ///
    /// Combined-file sections follow discovery order, which is whatever the
    /// filesystem returns. Turn this on when the combined file must be
    /// reproducible across machines.
    pub sort_paths: bool,

    /// Documents processed at once. Default: 4.
    ///
    /// Results keep discovery order regardless of this value.
    pub concurrency: usize,

    /// Receives info/warning messages. Default: [`TracingLog`].
    pub log: SharedBuildLog,

    /// Optional per-document progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            markdown_suffix: ".md".to_string(),
            combined_file_name: "llms.txt".to_string(),
            write_combined: true,
            extensions: vec!["html".to_string()],
            sort_paths: false,
            concurrency: 4,
            log: Arc::new(TracingLog),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("markdown_suffix", &self.markdown_suffix)
            .field("combined_file_name", &self.combined_file_name)
            .field("write_combined", &self.write_combined)
            .field("extensions", &self.extensions)
            .field("sort_paths", &self.sort_paths)
            .field("concurrency", &self.concurrency)
            .field("log", &"<dyn BuildLog>")
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn GenerationProgressCallback>"),
            )
            .finish()
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn markdown_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.markdown_suffix = suffix.into();
        self
    }

    pub fn combined_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.combined_file_name = name.into();
        self
    }

    pub fn write_combined(mut self, v: bool) -> Self {
        self.config.write_combined = v;
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn sort_paths(mut self, v: bool) -> Self {
        self.config.sort_paths = v;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn log(mut self, log: SharedBuildLog) -> Self {
        self.config.log = log;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, Docs2LlmsError> {
        let c = &self.config;
        if c.markdown_suffix.is_empty() {
            return Err(Docs2LlmsError::InvalidConfig(
                "Markdown suffix must not be empty (output would overwrite the HTML)".into(),
            ));
        }
        if c.markdown_suffix.contains(['/', '\\']) {
            return Err(Docs2LlmsError::InvalidConfig(format!(
                "Markdown suffix must not contain path separators, got {:?}",
                c.markdown_suffix
            )));
        }
        if c.combined_file_name.is_empty() || c.combined_file_name.contains(['/', '\\']) {
            return Err(Docs2LlmsError::InvalidConfig(format!(
                "Combined file name must be a plain file name, got {:?}",
                c.combined_file_name
            )));
        }
        if c.extensions.is_empty() {
            return Err(Docs2LlmsError::InvalidConfig(
                "At least one document extension is required".into(),
            ));
        }
        if let Some(ext) = c.extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
            return Err(Docs2LlmsError::InvalidConfig(format!(
                "Extensions are given without a leading dot, got {ext:?}"
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// What the documentation build reported before generation starts.
///
/// A failed build suppresses the whole batch: nothing is written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildOutcome {
    /// The build finished without a fatal error. (default)
    #[default]
    Success,
    /// The build failed; the reason is kept for the report.
    Failed(String),
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }
}

/// Which kind of output the documentation build produced.
///
/// Only a standalone HTML tree can be converted; any other builder makes the
/// batch inapplicable rather than failed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuilderKind {
    /// A tree of standalone `.html` pages. (default)
    #[default]
    Html,
    /// Any other builder, by name (`"latex"`, `"epub"`, …).
    Other(String),
}

impl fmt::Display for BuilderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderKind::Html => write!(f, "html"),
            BuilderKind::Other(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GenerationConfig::default();
        assert_eq!(c.markdown_suffix, ".md");
        assert_eq!(c.combined_file_name, "llms.txt");
        assert!(c.write_combined);
        assert_eq!(c.extensions, vec!["html".to_string()]);
        assert!(!c.sort_paths);
        assert_eq!(c.concurrency, 4);
        assert!(c.progress_callback.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let c = GenerationConfig::builder()
            .markdown_suffix(".txt")
            .combined_file_name("llms-full.txt")
            .write_combined(false)
            .extensions(["html", "htm"])
            .sort_paths(true)
            .concurrency(0)
            .build()
            .unwrap();
        assert_eq!(c.markdown_suffix, ".txt");
        assert_eq!(c.combined_file_name, "llms-full.txt");
        assert!(!c.write_combined);
        assert_eq!(c.extensions, vec!["html".to_string(), "htm".to_string()]);
        assert!(c.sort_paths);
        assert_eq!(c.concurrency, 1, "concurrency is clamped to at least 1");
    }

    #[test]
    fn empty_suffix_rejected() {
        let err = GenerationConfig::builder().markdown_suffix("").build().unwrap_err();
        assert!(matches!(err, Docs2LlmsError::InvalidConfig(_)));
    }

    #[test]
    fn combined_name_with_separator_rejected() {
        assert!(GenerationConfig::builder()
            .combined_file_name("out/llms.txt")
            .build()
            .is_err());
    }

    #[test]
    fn dotted_extension_rejected() {
        let err = GenerationConfig::builder()
            .extensions([".html"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("leading dot"), "got: {err}");
    }

    #[test]
    fn debug_elides_trait_objects() {
        let dbg = format!("{:?}", GenerationConfig::default());
        assert!(dbg.contains("<dyn BuildLog>"));
        assert!(dbg.contains("llms.txt"));
    }

    #[test]
    fn builder_kind_display() {
        assert_eq!(BuilderKind::Html.to_string(), "html");
        assert_eq!(BuilderKind::Other("latex".into()).to_string(), "latex");
    }

    #[test]
    fn build_outcome_default_is_success() {
        assert!(BuildOutcome::default().is_success());
        assert!(!BuildOutcome::Failed("sphinx error".into()).is_success());
    }
}
