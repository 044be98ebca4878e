//! The unit of conversion: one HTML page and its name.

use crate::convert::html_to_markdown;
use crate::error::Docs2LlmsError;
use std::path::{Path, PathBuf};

/// An HTML page paired with the name it is known by.
///
/// Immutable once created; converting it never changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    path: Option<PathBuf>,
    html: String,
}

impl Document {
    /// A document that did not come from disk.
    pub fn new(name: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            html: html.into(),
        }
    }

    /// Read a UTF-8 HTML file; the file name becomes the document name.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, Docs2LlmsError> {
        let path = path.as_ref();
        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Docs2LlmsError::from_read(path, e))?;
        Ok(Self {
            name: display_name(path),
            path: Some(path.to_path_buf()),
            html,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source path, if the document was read from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Convert this document's HTML to Markdown.
    pub fn to_markdown(&self) -> String {
        html_to_markdown(&self.html)
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_document_converts() {
        let doc = Document::new("index.html", "<h1>Hi</h1>");
        assert_eq!(doc.name(), "index.html");
        assert!(doc.path().is_none());
        assert_eq!(doc.to_markdown(), "# Hi");
        // The source is left untouched.
        assert_eq!(doc.html(), "<h1>Hi</h1>");
    }

    #[tokio::test]
    async fn read_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.html");
        std::fs::write(&path, "<p>Guide</p>").unwrap();

        let doc = Document::read(&path).await.unwrap();
        assert_eq!(doc.name(), "guide.html");
        assert_eq!(doc.path(), Some(path.as_path()));
        assert_eq!(doc.to_markdown(), "Guide");
    }

    #[tokio::test]
    async fn read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::read(dir.path().join("nope.html")).await.unwrap_err();
        assert!(matches!(err, Docs2LlmsError::InputNotFound { .. }));
    }

    #[tokio::test]
    async fn read_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.html");
        std::fs::write(&path, [b'<', b'p', b'>', 0xE9, b'<', b'/', b'p', b'>']).unwrap();

        let err = Document::read(&path).await.unwrap_err();
        assert!(matches!(err, Docs2LlmsError::ReadFailed { .. }));
    }
}
