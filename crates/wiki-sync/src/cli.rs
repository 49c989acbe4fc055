//! Command-line interface definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wiki publisher for markdown documentation trees
///
/// Stages a documentation tree into a GitHub wiki clone and rewrites image
/// references and internal links into the wiki's own syntax.
///
/// Exit Codes:
///   0  - Command succeeded
///   1  - Generic error occurred
///   2  - Invalid config file, or a wiki directory holding the source tree
///   3  - Directory or file not found
///   4  - Run finished but some files could not be rewritten
///  10  - File system operation failed
#[derive(Parser)]
#[command(name = "wiki-sync", version)]
#[command(about = "Publish a markdown documentation tree to a GitHub wiki", long_about = None)]
pub struct Cli {
    /// Suppress non-essential output (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the run report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file to use instead of ./wiki-sync.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy the documentation tree into the wiki directory and rewrite it
    ///
    /// The wiki directory is emptied first (its .git is kept), then the source
    /// tree is copied in without .git, .github, .editorconfig, and README.md.
    Publish {
        /// Documentation tree to publish (default: current directory)
        #[arg(long, value_name = "DIR")]
        source: Option<PathBuf>,

        /// Wiki clone used as the staging directory (default: ./wiki)
        #[arg(long, value_name = "DIR")]
        wiki: Option<PathBuf>,

        /// Repository identifier in owner/repo form
        #[arg(long, value_name = "OWNER/REPO")]
        repository: Option<String>,

        /// Base URL for images, overrides the one derived from the repository
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Rewrite an already staged tree in place
    Rewrite {
        /// Staging root to rewrite
        root: PathBuf,

        /// Repository identifier in owner/repo form
        #[arg(long, value_name = "OWNER/REPO")]
        repository: Option<String>,

        /// Base URL for images, overrides the one derived from the repository
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Print the rewritten content of one file without modifying it
    Preview {
        /// Markdown file to preview
        file: PathBuf,

        /// Staging root the file belongs to (default: the configured wiki directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Repository identifier in owner/repo form
        #[arg(long, value_name = "OWNER/REPO")]
        repository: Option<String>,

        /// Base URL for images, overrides the one derived from the repository
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },
}

impl Commands {
    /// Name used in JSON metadata
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Publish { .. } => "publish",
            Commands::Rewrite { .. } => "rewrite",
            Commands::Preview { .. } => "preview",
        }
    }
}
