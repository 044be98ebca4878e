//! Discovery: find the HTML pages a documentation build emitted.
//!
//! The walk follows filesystem traversal order. That order is not sorted and
//! may differ between platforms; it is also the order of sections in the
//! combined file. Callers that need reproducible output opt into
//! `sort_paths`, which sorts entries by file name within each directory.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Recursively collect the files under `root` whose extension is one of
/// `extensions`.
///
/// Extensions are compared exactly (`"html"` does not match `"HTML"`).
/// Symlinks to files are included; symlinked directories are not descended.
/// Unreadable directory entries are skipped with a debug log.
pub fn discover_documents(root: &Path, extensions: &[String], sort_paths: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root);
    if sort_paths {
        walker = walker.sort_by_file_name();
    }

    let found: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                debug!(error = %err, "Skipping unreadable directory entry");
                None
            }
        })
        // `path().is_file()` follows symlinks, so linked pages are kept.
        .filter(|e| e.path().is_file())
        .filter(|e| has_extension(e.path(), extensions))
        .map(|e| e.into_path())
        .collect();

    debug!(root = %root.display(), count = found.len(), "Discovered documents");
    found
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|wanted| wanted == ext))
        .unwrap_or(false)
}

/// Sibling output path for `source`: the full file name plus `suffix`.
///
/// `guide/index.html` with suffix `.md` becomes `guide/index.html.md`.
pub fn markdown_path_for(source: &Path, suffix: &str) -> PathBuf {
    let mut name = source
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    source.with_file_name(name)
}
