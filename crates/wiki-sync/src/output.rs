//! Console and JSON output for the CLI.
//!
//! Human-readable lines go through [`OutputContext`], which honours `--quiet`
//! and `--json`. With `--json`, run reports and errors are printed as a single
//! envelope ([`JsonOutput`] or [`JsonError`]) so CI steps can parse them.

use chrono::Utc;
use serde::{Serialize, Serializer};
use std::fmt::Display;
use std::io::{self, Write};

use crate::errors::{explain, WikiError};

/// Version of the JSON envelope format
const OUTPUT_VERSION: &str = "0.1.0";

/// Decides which console lines are printed for a run
pub struct OutputContext {
    quiet: bool,
    json: bool,
}

impl OutputContext {
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Run summary on stdout; replaced by the envelope under --json.
    pub fn print_data(&self, msg: impl Display) -> io::Result<()> {
        if self.json {
            return Ok(());
        }
        write_line(io::stdout(), &msg.to_string())
    }

    /// Progress detail on stdout, hidden by --quiet and --json.
    pub fn print_info(&self, msg: impl Display) -> io::Result<()> {
        if self.quiet || self.json {
            return Ok(());
        }
        write_line(io::stdout(), &msg.to_string())
    }

    /// Skipped-file notice on stderr, hidden by --quiet and --json.
    pub fn print_warning(&self, msg: impl Display) -> io::Result<()> {
        if self.quiet || self.json {
            return Ok(());
        }
        write_line(io::stderr(), &format!("Warning: {}", msg))
    }

    /// Fatal error on stderr, printed even with --quiet.
    pub fn print_error(&self, msg: impl Display) -> io::Result<()> {
        write_line(io::stderr(), &format!("Error: {}", msg))
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Write one line, treating a closed pipe (`wiki-sync ... | head`) as a clean exit.
fn write_line(mut out: impl Write, msg: &str) -> io::Result<()> {
    match writeln!(out, "{}", msg) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => std::process::exit(0),
        other => other,
    }
}

/// Envelope for a finished command
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub metadata: Metadata,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T, command: impl Into<String>) -> Self {
        Self::with_status(true, data, command)
    }

    /// The run finished but some files failed.
    pub fn partial(data: T, command: impl Into<String>) -> Self {
        Self::with_status(false, data, command)
    }

    fn with_status(success: bool, data: T, command: impl Into<String>) -> Self {
        Self {
            success,
            data,
            metadata: Metadata::new(command),
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Envelope for a command that aborted
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub success: bool,
    pub error: ErrorDetail,
    pub metadata: Metadata,
}

/// Code, message, and remediation hints of a failed command
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl JsonError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                path: None,
                suggestions: Vec::new(),
            },
            metadata: Metadata::new(command),
        }
    }

    /// Envelope for a library error, carrying its path and the same
    /// remedies the human-readable message lists.
    pub fn from_wiki_error(error: &WikiError, command: impl Into<String>) -> Self {
        let mut json = Self::new(ErrorCode::for_error(error), error.to_string(), command);
        json.error.path = Some(error.path().display().to_string());
        explain(error)
            .remedies()
            .iter()
            .fold(json, |json, remedy| json.with_suggestion(remedy.clone()))
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.error.suggestions.push(suggestion.into());
        self
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn exit_code(&self) -> ExitCode {
        ErrorCode::to_exit_code(&self.error.code)
    }
}

/// Process exit codes of the wiki-sync CLI
///
/// # Examples
///
/// ```no_run
/// use wiki_sync::output::ExitCode;
///
/// std::process::exit(ExitCode::FilesFailed.code());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GenericError = 1,
    /// Bad config file or a wiki directory that would swallow the source tree
    InvalidArgument = 2,
    /// Source tree, staging root, config file, or previewed file is missing
    NotFound = 3,
    /// The run finished but some files could not be rewritten
    FilesFailed = 4,
    /// Reading, copying, or deleting on disk failed
    ExternalError = 10,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Error codes reported in [`ErrorDetail::code`]
pub struct ErrorCode;

impl ErrorCode {
    pub const NOT_FOUND: &'static str = "NOT_FOUND";
    pub const TRAVERSAL_FAILED: &'static str = "TRAVERSAL_FAILED";
    pub const STAGING_FAILED: &'static str = "STAGING_FAILED";
    pub const OVERLAPPING_DIRECTORIES: &'static str = "OVERLAPPING_DIRECTORIES";
    pub const CONFIG_INVALID: &'static str = "CONFIG_INVALID";
    pub const IO_ERROR: &'static str = "IO_ERROR";

    fn for_error(error: &WikiError) -> &'static str {
        if error.is_not_found() {
            return Self::NOT_FOUND;
        }
        match error {
            WikiError::Traversal { .. } => Self::TRAVERSAL_FAILED,
            WikiError::Read { .. } | WikiError::Write { .. } => Self::IO_ERROR,
            WikiError::Staging { source, .. } if source.kind() == io::ErrorKind::InvalidInput => {
                Self::OVERLAPPING_DIRECTORIES
            }
            WikiError::Staging { .. } => Self::STAGING_FAILED,
            WikiError::ConfigRead { .. } | WikiError::ConfigParse { .. } => Self::CONFIG_INVALID,
        }
    }

    pub fn to_exit_code(code: &str) -> ExitCode {
        match code {
            Self::NOT_FOUND => ExitCode::NotFound,
            Self::CONFIG_INVALID | Self::OVERLAPPING_DIRECTORIES => ExitCode::InvalidArgument,
            Self::TRAVERSAL_FAILED | Self::STAGING_FAILED | Self::IO_ERROR => {
                ExitCode::ExternalError
            }
            _ => ExitCode::GenericError,
        }
    }
}

/// Generation time, envelope version, and command of a JSON response
#[derive(Debug, Serialize)]
pub struct Metadata {
    #[serde(serialize_with = "rfc3339")]
    pub timestamp: chrono::DateTime<Utc>,
    pub version: String,
    pub command: String,
}

impl Metadata {
    fn new(command: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            version: OUTPUT_VERSION.to_string(),
            command: command.into(),
        }
    }
}

fn rfc3339<S>(dt: &chrono::DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}
