//! Internal link rewriting.
//!
//! Wiki pages live in one flat namespace, so a link to another markdown page
//! keeps only the page name:
//!
//! ```text
//! [Backend](Life-Cycle/Architecture/Backend-Design.md)  ->  [Backend](Backend-Design)
//! ```
//!
//! Only the `](target)` part is touched; link text is never rewritten. Images
//! must already have been converted by [`super::rewrite_images`], otherwise an
//! image whose path ends in `.md` would be flattened as a page link.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

use super::paths::{is_external, page_name};

/// `](target.md)` where the target is the shortest whitespace-free span ending in `.md)`.
///
/// Lazy so that `Styling-(PEP-8).md)` stops at the first `.md)` instead of
/// running on to a later `)` on the same line. Link destinations cannot hold
/// whitespace, so prose such as `see (notes.md)` after a link is never pulled in.
static LINK_TARGET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\]\((\S+?\.md)\)").expect("link pattern is a valid regex")
});

/// Opening of a link target inside a matched span.
const TARGET_OPEN: &str = "](";

/// Rewrite every internal `.md` link target in `text` to its flat page name.
///
/// # Example
///
/// ```
/// use wiki_sync::document::rewrite_links;
///
/// assert_eq!(
///     rewrite_links("See [Home](Home.md) and [Tests](Life-Cycle/Tests.md)."),
///     "See [Home](Home) and [Tests](Tests)."
/// );
/// ```
pub fn rewrite_links(text: &str) -> Cow<'_, str> {
    LINK_TARGET_PATTERN.replace_all(text, |caps: &Captures| {
        let (Some(whole), Some(target)) = (caps.get(0), caps.get(1)) else {
            return caps.get(0).map_or_else(String::new, |m| m.as_str().to_string());
        };

        // The lazy span can start at an earlier non-page target directly followed
        // by another link, e.g. `[a](img/x.png)[b](dir/y.md)`. Only the text after
        // the last `](` is the page link; everything before it is passed through.
        let target = target.as_str();
        let (passthrough, target) = match target.rfind(TARGET_OPEN) {
            Some(idx) => target.split_at(idx + TARGET_OPEN.len()),
            None => ("", target),
        };

        if is_external(target) {
            return whole.as_str().to_string();
        }

        format!("]({}{})", passthrough, page_name(target))
    })
}
