//! Error types and actionable error formatting.
//!
//! [`WikiError`] is the typed error surfaced by the library. Every variant carries
//! the path it failed on so the operator can tell which file or directory broke.
//!
//! [`ActionableError`] wraps a message with possible causes and remediation steps
//! for display by the CLI.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for wiki-sync library operations.
pub type Result<T> = std::result::Result<T, WikiError>;

/// Errors raised while staging or rewriting a wiki tree
#[derive(Debug, Error)]
pub enum WikiError {
    /// The staging root is missing or one of its directories could not be read
    #[error("Failed to traverse '{}': {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A markdown file could not be read
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rewritten markdown file could not be written back
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Clearing or populating the staging directory failed
    #[error("Failed to stage '{}': {source}", path.display())]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file exists but could not be read
    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::WikiConfig`]
    #[error("Failed to parse config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl WikiError {
    /// Path of the file or directory the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            WikiError::Traversal { path, .. }
            | WikiError::Read { path, .. }
            | WikiError::Write { path, .. }
            | WikiError::Staging { path, .. }
            | WikiError::ConfigRead { path, .. }
            | WikiError::ConfigParse { path, .. } => path,
        }
    }

    /// Whether the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        let io_kind = match self {
            WikiError::Traversal { source, .. } => source.io_error().map(|e| e.kind()),
            WikiError::Read { source, .. }
            | WikiError::Write { source, .. }
            | WikiError::Staging { source, .. }
            | WikiError::ConfigRead { source, .. } => Some(source.kind()),
            WikiError::ConfigParse { .. } => None,
        };
        io_kind == Some(std::io::ErrorKind::NotFound)
    }
}

/// An error with diagnostic context and remediation steps.
///
/// # Example
///
/// ```
/// use wiki_sync::errors::ActionableError;
///
/// let error = ActionableError::new("Staging root 'wiki' not found")
///     .with_cause("The wiki repository was not cloned")
///     .with_remedy("Clone the wiki next to the docs: git clone <repo>.wiki.git wiki");
///
/// assert!(error.to_string().contains("To fix:"));
/// ```
#[derive(Debug, Clone)]
pub struct ActionableError {
    error: String,
    causes: Vec<String>,
    remediation: Vec<String>,
}

impl ActionableError {
    /// Create a new actionable error with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            causes: Vec::new(),
            remediation: Vec::new(),
        }
    }

    /// Add a possible cause (diagnostic hint).
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Add a remediation step (actionable fix).
    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.remediation.push(remedy.into());
        self
    }

    /// Remediation steps, in the order they were added.
    pub fn remedies(&self) -> &[String] {
        &self.remediation
    }

    /// Convert to a formatted error message suitable for display.
    pub fn to_error_message(&self) -> String {
        let mut msg = format!("Error: {}\n", self.error);

        if !self.causes.is_empty() {
            msg.push_str("\nPossible causes:\n");
            for cause in &self.causes {
                msg.push_str(&format!("  • {}\n", cause));
            }
        }

        if !self.remediation.is_empty() {
            msg.push_str("\nTo fix:\n");
            for remedy in &self.remediation {
                msg.push_str(&format!("  • {}\n", remedy));
            }
        }

        msg
    }
}

impl fmt::Display for ActionableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_error_message())
    }
}

impl std::error::Error for ActionableError {}

/// Build the operator-facing message for a [`WikiError`].
pub fn explain(error: &WikiError) -> ActionableError {
    match error {
        WikiError::Traversal { path, .. } => traversal_failed(&path.display().to_string(), error),
        WikiError::Read { path, .. } | WikiError::Write { path, .. } => {
            ActionableError::new(error.to_string())
                .with_cause("The file permissions may prevent access")
                .with_remedy(format!("Check the file permissions: ls -l {}", path.display()))
        }
        WikiError::Staging { path, source } if source.kind() == std::io::ErrorKind::InvalidInput => {
            overlapping_directories(&path.display().to_string(), source)
        }
        WikiError::Staging { path, .. } => staging_failed(&path.display().to_string(), error),
        WikiError::ConfigRead { .. } | WikiError::ConfigParse { .. } => {
            ActionableError::new(error.to_string())
                .with_cause("The config file may contain a typo or an unknown key")
                .with_remedy("Compare the file against the documented keys: source_dir, wiki_dir, repository, base_url, exclude, preserve")
                .with_remedy("Run without a config file by removing or renaming wiki-sync.toml")
        }
    }
}

/// Helper to create staging root traversal errors with standard remediation.
pub fn traversal_failed(root: &str, cause: impl fmt::Display) -> ActionableError {
    ActionableError::new(format!("Cannot walk staging root '{}'", root))
        .with_cause(format!("Underlying error: {}", cause))
        .with_cause("The wiki repository may not have been cloned yet")
        .with_cause("A directory inside the tree may not be readable")
        .with_remedy(format!("Verify the directory exists: ls -la {}", root))
        .with_remedy("Point the command at the staged tree: wiki-sync rewrite <dir>")
}

/// Helper to create staging errors with standard remediation.
pub fn staging_failed(path: &str, cause: impl fmt::Display) -> ActionableError {
    ActionableError::new(format!("Cannot stage documentation into '{}'", path))
        .with_cause(format!("Underlying error: {}", cause))
        .with_cause("The target directory may be read-only")
        .with_remedy("Check that the wiki directory is writable")
        .with_remedy("Use --wiki to choose another staging directory")
}

/// Helper for a wiki directory that is, or contains, the source tree.
pub fn overlapping_directories(wiki_dir: &str, cause: impl fmt::Display) -> ActionableError {
    ActionableError::new(format!("Refusing to clear '{}': {}", wiki_dir, cause))
        .with_cause("--wiki points at the documentation tree or one of its parents")
        .with_remedy("Clone the wiki into its own directory, e.g. ./wiki")
        .with_remedy("Pass that directory with --wiki, or set wiki_dir in wiki-sync.toml")
}

/// Helper for runs that finished with per-file failures.
pub fn files_failed(count: usize) -> ActionableError {
    ActionableError::new(format!("{} file(s) could not be rewritten", count))
        .with_cause("A file may not be valid UTF-8")
        .with_cause("A file may be locked or read-only")
        .with_remedy("Re-run with RUST_LOG=wiki_sync=debug to see every file processed")
        .with_remedy("Re-run with --json to get the list of failed paths")
}
