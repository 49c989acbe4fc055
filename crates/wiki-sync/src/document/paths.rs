//! Lexical path helpers shared by the rewriters.
//!
//! All paths here are wiki paths: `/`-separated strings relative to the staging
//! root. They are never touched on disk, so resolution is purely textual and
//! behaves the same on every platform.

use std::path::{Component, Path, PathBuf};

/// Prefix that marks a target as an external reference.
///
/// Deliberately a bare `http` rather than `http://` or `https://`.
const EXTERNAL_PREFIX: &str = "http";

/// Extension of pages that become wiki pages.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Returns true if the target is an external reference left untouched by both rewriters.
pub fn is_external(target: &str) -> bool {
    target.starts_with(EXTERNAL_PREFIX)
}

/// Join `relative` onto `file_dir` and normalize the result.
///
/// Empty and `.` segments are dropped, `..` pops the previous segment. A `..`
/// with nothing left to pop is kept, so paths that walk above the staging
/// root stay visible instead of silently landing on the root.
///
/// # Example
///
/// ```
/// use wiki_sync::document::join_normalized;
///
/// assert_eq!(
///     join_normalized("Life-Cycle/Git-Flow", "../.assets/x.svg"),
///     "Life-Cycle/.assets/x.svg"
/// );
/// assert_eq!(join_normalized(".", "./img//a.png"), "img/a.png");
/// ```
pub fn join_normalized(file_dir: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in file_dir.split('/').chain(relative.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

/// Final segment of a `/`-separated path.
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Wiki page name for a markdown link target: the basename without `.md`.
///
/// Repeated extensions are all removed so a page name never ends in `.md`.
pub fn page_name(path: &str) -> &str {
    basename(path).trim_end_matches(MARKDOWN_EXTENSION)
}

/// Directory of `file` relative to `root`, `/`-separated, `"."` for files at the root.
///
/// `.` components are ignored on both sides, so `./wiki/A/B.md` under `wiki`
/// gives `A`. Files outside `root` yield their own parent directory unchanged.
pub fn relative_dir(root: &Path, file: &Path) -> String {
    let root = without_cur_dir(root);
    let parent = without_cur_dir(file.parent().unwrap_or(Path::new("")));
    let relative = parent.strip_prefix(&root).unwrap_or(&parent);

    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}
