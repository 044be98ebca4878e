//! Aggregation: concatenate generated Markdown into one combined file.
//!
//! Each section is headed by the generated file's name:
//!
//! ```text
//! # index.html.md
//!
//! <markdown of index.html>
//!
//! # api.html.md
//!
//! <markdown of api.html>
//!
//! ```
//!
//! Sections follow the order they are given in, which is discovery order.

use crate::error::Docs2LlmsError;
use std::path::Path;
use tracing::debug;

/// A generated Markdown file, ready to be concatenated.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    /// File name of the generated Markdown file, used as the heading.
    pub name: &'a str,
    pub markdown: &'a str,
}

/// Build the combined text from `sections`, in order.
pub fn assemble_combined(sections: &[Section<'_>]) -> String {
    let capacity = sections
        .iter()
        .map(|s| s.name.len() + s.markdown.len() + 8)
        .sum();
    let mut out = String::with_capacity(capacity);
    for section in sections {
        out.push_str("# ");
        out.push_str(section.name);
        out.push_str("\n\n");
        out.push_str(section.markdown);
        out.push_str("\n\n");
    }
    out
}

/// Write `contents` to `path` atomically (temp file, then rename).
pub async fn write_atomic(path: &Path, contents: &str) -> Result<(), Docs2LlmsError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Docs2LlmsError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(|e| Docs2LlmsError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(Docs2LlmsError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        });
    }

    debug!(path = %path.display(), bytes = contents.len(), "Wrote file atomically");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_single_section() {
        let sections = [Section {
            name: "index.html.md",
            markdown: "# Welcome",
        }];
        assert_eq!(
            assemble_combined(&sections),
            "# index.html.md\n\n# Welcome\n\n"
        );
    }

    #[test]
    fn test_assemble_keeps_order() {
        let sections = [
            Section {
                name: "b.html.md",
                markdown: "B",
            },
            Section {
                name: "a.html.md",
                markdown: "A",
            },
        ];
        assert_eq!(
            assemble_combined(&sections),
            "# b.html.md\n\nB\n\n# a.html.md\n\nA\n\n"
        );
    }

    #[test]
    fn test_assemble_empty() {
        assert_eq!(assemble_combined(&[]), "");
    }

    #[tokio::test]
    async fn test_write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llms.txt");
        std::fs::write(&path, "stale").unwrap();

        write_atomic(&path, "fresh").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
        assert!(!dir.path().join("llms.txt.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_atomic_onto_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llms.txt");
        std::fs::create_dir(&path).unwrap();

        let err = write_atomic(&path, "x").await.unwrap_err();
        assert!(matches!(err, Docs2LlmsError::OutputWriteFailed { .. }));
        assert!(!dir.path().join("llms.txt.tmp").exists());
    }
}
