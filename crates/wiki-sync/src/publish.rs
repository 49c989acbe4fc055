//! Rewriting a staged tree in place.
//!
//! The [`Publisher`] walks the staging root, rewrites each markdown file with
//! [`crate::document::rewrite_content`], and writes it back only when the text
//! changed. Files are independent: a file that cannot be read or written is
//! logged and recorded in the [`RunReport`], and the run moves on to the next
//! one. Only a failed walk of the root aborts the run.

use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::config::Settings;
use crate::document::{markdown_files, relative_dir, rewrite_content};
use crate::errors::{Result, WikiError};
use crate::staging;

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// Content changed and was written back
    Rewritten,
    /// Nothing to rewrite; the file was left untouched
    Unchanged,
}

/// A file that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Summary of one rewrite run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Entries removed from the wiki directory before staging (publish only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries_removed: Option<usize>,
    /// Files copied into the wiki directory (publish only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_copied: Option<usize>,
    pub files_scanned: usize,
    pub files_rewritten: usize,
    pub files_unchanged: usize,
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    /// True when every file was processed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, path: &Path, outcome: Result<FileOutcome>) {
        self.files_scanned += 1;
        match outcome {
            Ok(FileOutcome::Rewritten) => self.files_rewritten += 1,
            Ok(FileOutcome::Unchanged) => self.files_unchanged += 1,
            Err(err) => {
                error!(path = %path.display(), error = %err, "skipping file");
                self.failures.push(FileFailure {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                });
            }
        }
    }
}

/// Rewrites the markdown files of one staging root
///
/// # Example
///
/// ```no_run
/// use wiki_sync::publish::Publisher;
///
/// let publisher = Publisher::new("wiki", "https://raw.githubusercontent.com/wiki/o/r");
/// let report = publisher.rewrite_tree()?;
/// println!("{} of {} files rewritten", report.files_rewritten, report.files_scanned);
/// # Ok::<(), wiki_sync::errors::WikiError>(())
/// ```
pub struct Publisher {
    staging_root: PathBuf,
    base_url: String,
}

impl Publisher {
    /// Create a publisher for `staging_root` serving images from `base_url`
    pub fn new(staging_root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            staging_root: staging_root.into(),
            base_url: base_url.into(),
        }
    }

    /// Rewritten content of `path` without touching the file.
    pub fn preview_file(&self, path: &Path) -> Result<String> {
        let text = read_markdown(path)?;
        let file_dir = relative_dir(&self.staging_root, path);
        Ok(rewrite_content(&text, &file_dir, &self.base_url).into_owned())
    }

    /// Rewrite one file in place.
    ///
    /// The file is written back only when its content changed.
    pub fn rewrite_file(&self, path: &Path) -> Result<FileOutcome> {
        let text = read_markdown(path)?;
        let file_dir = relative_dir(&self.staging_root, path);

        match rewrite_content(&text, &file_dir, &self.base_url) {
            Cow::Owned(rewritten) if rewritten != text => {
                fs::write(path, rewritten).map_err(|source| WikiError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
                debug!(path = %path.display(), dir = %file_dir, "rewritten");
                Ok(FileOutcome::Rewritten)
            }
            _ => {
                debug!(path = %path.display(), "unchanged");
                Ok(FileOutcome::Unchanged)
            }
        }
    }

    /// Rewrite every markdown file under the staging root.
    ///
    /// Per-file failures are collected in the report; only a traversal
    /// failure is returned as an error.
    pub fn rewrite_tree(&self) -> Result<RunReport> {
        let files = markdown_files(&self.staging_root)?;
        info!(
            root = %self.staging_root.display(),
            files = files.len(),
            base_url = %self.base_url,
            "rewriting markdown files"
        );

        let mut report = RunReport::default();
        for path in &files {
            report.record(path, self.rewrite_file(path));
        }

        info!(
            rewritten = report.files_rewritten,
            unchanged = report.files_unchanged,
            failed = report.failures.len(),
            "rewrite finished"
        );
        Ok(report)
    }
}

/// Clear the wiki directory, copy the source tree into it, and rewrite it.
///
/// Nothing is cleared when the wiki directory is the source tree or contains it.
pub fn publish(settings: &Settings) -> Result<RunReport> {
    staging::ensure_disjoint(&settings.source_dir, &settings.wiki_dir)?;

    let removed = staging::clear_directory(&settings.wiki_dir, &settings.preserve)?;
    info!(dir = %settings.wiki_dir.display(), removed, "cleared wiki directory");

    let copied = staging::copy_tree(&settings.source_dir, &settings.wiki_dir, &settings.exclude)?;
    info!(
        source = %settings.source_dir.display(),
        target = %settings.wiki_dir.display(),
        copied,
        "staged documentation"
    );

    let mut report = Publisher::new(&settings.wiki_dir, &settings.base_url).rewrite_tree()?;
    report.entries_removed = Some(removed);
    report.files_copied = Some(copied);
    Ok(report)
}

fn read_markdown(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| WikiError::Read {
        path: path.to_path_buf(),
        source,
    })
}
