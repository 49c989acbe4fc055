//! Markdown-to-wiki rewriting
//!
//! Two pure text transformations turn a documentation page into a wiki page:
//! images become absolute-URL wiki image directives and links to other
//! markdown pages become flat page names. Images must be rewritten first,
//! because `![alt](path)` also contains the `[text](path)` link shape.

mod discovery;
mod images;
mod links;
mod paths;

#[cfg(test)]
mod rewrite_proptests;

pub use discovery::markdown_files;
pub use images::rewrite_images;
pub use links::rewrite_links;
pub use paths::{basename, is_external, join_normalized, page_name, relative_dir};

use std::borrow::Cow;

/// Apply both rewriters in the required order: images, then links.
///
/// # Example
///
/// ```
/// use wiki_sync::document::rewrite_content;
///
/// let out = rewrite_content(
///     "![Logo](../logo.png) see [Setup](../Setup.md)",
///     "Guides/Start",
///     "https://raw.githubusercontent.com/wiki/o/r",
/// );
/// assert_eq!(
///     out,
///     "[[https://raw.githubusercontent.com/wiki/o/r/Guides/logo.png|alt=Logo]] see [Setup](Setup)"
/// );
/// ```
pub fn rewrite_content<'a>(text: &'a str, file_dir: &str, base_url: &str) -> Cow<'a, str> {
    match rewrite_images(text, file_dir, base_url) {
        Cow::Borrowed(unchanged) => rewrite_links(unchanged),
        Cow::Owned(images_done) => Cow::Owned(rewrite_links(&images_done).into_owned()),
    }
}
