//! Image reference rewriting.
//!
//! Converts markdown images into wiki image directives pointing at the
//! externally hosted copy of the asset:
//!
//! ```text
//! ![Arch](../.assets/x.svg)   in Life-Cycle/Git-Flow/Page.md
//! [[https://raw.githubusercontent.com/wiki/o/r/Life-Cycle/.assets/x.svg|alt=Arch]]
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

use super::paths::{is_external, join_normalized};

/// `![alt](path)`: alt may be empty, path runs up to the first `)`.
static IMAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern is a valid regex")
});

/// Rewrite every image reference in `text`.
///
/// `file_dir` is the directory of the file being rewritten relative to the
/// staging root (`"."` for the root itself) and `base_url` the location the
/// wiki serves raw files from. External images (`http...`) are left as they are.
///
/// # Example
///
/// ```
/// use wiki_sync::document::rewrite_images;
///
/// let out = rewrite_images(
///     "![](.assets/flow.png)",
///     "Life-Cycle/Architecture",
///     "https://raw.githubusercontent.com/wiki/o/r",
/// );
/// assert_eq!(
///     out,
///     "[[https://raw.githubusercontent.com/wiki/o/r/Life-Cycle/Architecture/.assets/flow.png]]"
/// );
/// ```
pub fn rewrite_images<'a>(text: &'a str, file_dir: &str, base_url: &str) -> Cow<'a, str> {
    let base_url = base_url.trim_end_matches('/');

    IMAGE_PATTERN.replace_all(text, |caps: &Captures| {
        let (Some(whole), Some(alt), Some(path)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            // Malformed match: keep the original text for this occurrence
            return caps.get(0).map_or_else(String::new, |m| m.as_str().to_string());
        };

        let path = path.as_str();
        if is_external(path) {
            return whole.as_str().to_string();
        }

        wiki_image(base_url, &join_normalized(file_dir, path), alt.as_str())
    })
}

/// Format a wiki image directive.
fn wiki_image(base_url: &str, resolved_path: &str, alt: &str) -> String {
    if alt.is_empty() {
        format!("[[{}/{}]]", base_url, resolved_path)
    } else {
        format!("[[{}/{}|alt={}]]", base_url, resolved_path, alt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://raw.githubusercontent.com/wiki/rios0rios0/guide";

    fn rewrite(input: &str, file_dir: &str) -> String {
        rewrite_images(input, file_dir, BASE_URL).into_owned()
    }

    #[test]
    fn test_image_in_root_directory() {
        assert_eq!(
            rewrite("![](.assets/flow-view.png)", "."),
            format!("[[{}/.assets/flow-view.png]]", BASE_URL)
        );
    }

    #[test]
    fn test_image_in_nested_directory() {
        assert_eq!(
            rewrite("![](.assets/requests_flow.png)", "Life-Cycle/Architecture"),
            format!(
                "[[{}/Life-Cycle/Architecture/.assets/requests_flow.png]]",
                BASE_URL
            )
        );
    }

    #[test]
    fn test_image_with_parent_directory_traversal() {
        assert_eq!(
            rewrite("![](../.assets/feature-branches.svg)", "Life-Cycle/Git-Flow"),
            format!("[[{}/Life-Cycle/.assets/feature-branches.svg]]", BASE_URL)
        );
    }

    #[test]
    fn test_image_with_alt_text() {
        assert_eq!(
            rewrite("![Architecture](.assets/clean-architecture.png)", "Life-Cycle"),
            format!(
                "[[{}/Life-Cycle/.assets/clean-architecture.png|alt=Architecture]]",
                BASE_URL
            )
        );
    }

    #[test]
    fn test_multiple_images_in_table_row() {
        let input = "| ![](.assets/not-clean.png) | ![](.assets/clean.png) |";
        let expected = format!(
            "| [[{0}/Life-Cycle/.assets/not-clean.png]] | [[{0}/Life-Cycle/.assets/clean.png]] |",
            BASE_URL
        );
        assert_eq!(rewrite(input, "Life-Cycle"), expected);
    }

    #[test]
    fn test_external_image_unchanged() {
        let input = "![logo](https://example.com/logo.png)";
        assert_eq!(rewrite(input, "."), input);
    }

    #[test]
    fn test_external_and_local_on_same_line() {
        let input = "![a](http://x.io/a.png) ![b](b.png)";
        assert_eq!(
            rewrite(input, "Docs"),
            format!("![a](http://x.io/a.png) [[{}/Docs/b.png|alt=b]]", BASE_URL)
        );
    }

    #[test]
    fn test_plain_text_unchanged_and_borrowed() {
        let input = "This is a regular paragraph with a [link](Page.md).";
        let out = rewrite_images(input, ".", BASE_URL);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, input);
    }

    #[test]
    fn test_trailing_slash_on_base_url() {
        let out = rewrite_images("![](a.png)", ".", "https://host/wiki/o/r/");
        assert_eq!(out, "[[https://host/wiki/o/r/a.png]]");
    }

    #[test]
    fn test_rewritten_image_no_longer_looks_like_image() {
        let once = rewrite("![x](a.png)", ".");
        assert_eq!(rewrite(&once, "."), once);
    }

    #[test]
    fn test_multiline_text_preserves_line_order() {
        let input = "# Title\n\n![](a.png)\n\nText\n![B](../b.png)\n";
        let expected = format!(
            "# Title\n\n[[{0}/Docs/Guide/a.png]]\n\nText\n[[{0}/Docs/b.png|alt=B]]\n",
            BASE_URL
        );
        assert_eq!(rewrite(input, "Docs/Guide"), expected);
    }
}
