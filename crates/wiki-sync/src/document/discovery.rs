//! Markdown file discovery under a staging root.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::{Result, WikiError};

use super::paths::MARKDOWN_EXTENSION;

/// Collect every regular file below `root` whose name ends in `.md`.
///
/// The match is case-sensitive (`README.MD` is skipped). Directories are walked
/// but never returned, symlinks are not followed, and the result is sorted so
/// runs are reproducible. A missing root or an unreadable directory aborts the
/// walk with [`WikiError::Traversal`].
pub fn markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| WikiError::Traversal {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        let is_markdown = is_markdown_name(&entry.file_name().to_string_lossy());
        if entry.file_type().is_file() && is_markdown {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

fn is_markdown_name(name: &str) -> bool {
    name.ends_with(MARKDOWN_EXTENSION)
}
