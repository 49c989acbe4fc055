//! Staging directory preparation.
//!
//! Before rewriting, the wiki directory is emptied (keeping its `.git`) and
//! refilled with a fresh copy of the documentation tree.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{Result, WikiError};

/// Refuse layouts where clearing `wiki_dir` would delete the tree being published.
///
/// Fails when `wiki_dir` is `source` itself or one of its ancestors. A wiki
/// directory that does not exist yet cannot hold the source and is accepted.
pub fn ensure_disjoint(source: &Path, wiki_dir: &Path) -> Result<()> {
    let source_abs = fs::canonicalize(source).map_err(|err| staging_error(source, err))?;
    let wiki_abs = match fs::canonicalize(wiki_dir) {
        Ok(path) => path,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(staging_error(wiki_dir, err)),
    };

    if source_abs.starts_with(&wiki_abs) {
        let reason = format!(
            "wiki directory contains the source tree '{}'",
            source.display()
        );
        return Err(staging_error(
            wiki_dir,
            io::Error::new(io::ErrorKind::InvalidInput, reason),
        ));
    }
    Ok(())
}

/// Remove every entry directly inside `dir` except the names in `preserve`.
///
/// Creates `dir` when it does not exist yet. Returns the number of entries removed.
pub fn clear_directory(dir: &Path, preserve: &[String]) -> Result<usize> {
    fs::create_dir_all(dir).map_err(|source| staging_error(dir, source))?;

    let mut removed = 0;
    for entry in fs::read_dir(dir).map_err(|source| staging_error(dir, source))? {
        let entry = entry.map_err(|source| staging_error(dir, source))?;
        let name = entry.file_name();
        if preserve.iter().any(|keep| name.as_os_str() == keep.as_str()) {
            continue;
        }

        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|source| staging_error(&path, source))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        }
        .map_err(|source| staging_error(&path, source))?;

        debug!(path = %path.display(), "removed");
        removed += 1;
    }

    Ok(removed)
}

/// Copy the tree under `source` into `target`, skipping excluded top-level names.
///
/// When `target` lives inside `source` (the usual `./wiki` layout) it is skipped
/// as well, so the copy never recurses into itself. Returns the number of files copied.
pub fn copy_tree(source: &Path, target: &Path, exclude: &[String]) -> Result<usize> {
    fs::create_dir_all(target).map_err(|err| staging_error(target, err))?;
    let skip_target = nested_top_level(source, target);

    let walker = WalkDir::new(source)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() != 1 {
                return true;
            }
            let name = entry.file_name();
            let excluded = exclude.iter().any(|skip| name == skip.as_str());
            let is_target = skip_target.as_deref().is_some_and(|skip| name == skip);
            !(excluded || is_target)
        });

    let mut copied = 0;
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(source).to_path_buf();
            staging_error(&path, io::Error::from(err))
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| staging_error(entry.path(), io::ErrorKind::InvalidInput.into()))?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)
                .map_err(|source| staging_error(&destination, source))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(|source| staging_error(parent, source))?;
            }
            fs::copy(entry.path(), &destination)
                .map_err(|source| staging_error(&destination, source))?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Name of the top-level entry of `source` that contains `target`, if any.
fn nested_top_level(source: &Path, target: &Path) -> Option<OsString> {
    let source = fs::canonicalize(source).ok()?;
    let target = fs::canonicalize(target).ok()?;
    let relative = target.strip_prefix(&source).ok()?;
    relative
        .components()
        .next()
        .map(|first| first.as_os_str().to_os_string())
}

fn staging_error(path: &Path, source: io::Error) -> WikiError {
    WikiError::Staging {
        path: path.to_path_buf(),
        source,
    }
}
