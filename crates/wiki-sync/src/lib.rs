//! wiki-sync library
//!
//! Stages a markdown documentation tree into a GitHub wiki clone and rewrites
//! it for the wiki: relative image references become absolute wiki image
//! directives, and links to other markdown pages become flat page names.
//!
//! The rewriting itself lives in [`document`] and is pure text-in, text-out.
//! [`publish`] drives it over a directory tree, and [`staging`] prepares that
//! tree.

pub mod cli;
pub mod config;
pub mod document;
pub mod errors;
pub mod output;
pub mod publish;
pub mod staging;

// Re-export commonly used types
pub use config::{Settings, WikiConfig};
pub use document::{rewrite_content, rewrite_images, rewrite_links};
pub use errors::WikiError;
pub use output::{ExitCode, JsonError, JsonOutput};
pub use publish::{publish, FileOutcome, Publisher, RunReport};
