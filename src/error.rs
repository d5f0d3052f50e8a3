//! Centralized error handling for the json-toolkit engine.
//!
//! Every fallible library operation returns [`Result`], whose error type is
//! the [`ToolkitError`] enum. Conversions from the underlying I/O, JSON and
//! CSV errors are implemented with `From`, so `?` works across layers:
//!
//! ```no_run
//! use json_toolkit::error::Result;
//! use std::fs;
//!
//! fn read_keywords(path: &str) -> Result<String> {
//!     let content = fs::read_to_string(path)?;
//!     Ok(content)
//! }
//! ```
//!
//! ## Context Extension Trait
//!
//! [`ResultExt`] adds `.context()` to any `Result` whose error converts into
//! [`ToolkitError`]:
//!
//! ```no_run
//! use json_toolkit::error::ResultExt as _;
//! use std::fs;
//!
//! fn load() -> json_toolkit::error::Result<String> {
//!     fs::read_to_string("data.json").context("Failed to load dataset")
//! }
//! ```
//!
//! ## Recoverable errors
//!
//! The interactive loop keeps running after a bad parameter but stops on
//! I/O failures. [`ToolkitError::is_recoverable`] draws that line.

use std::fmt;

/// Main error type for json-toolkit operations.
#[derive(Debug)]
pub enum ToolkitError {
    /// I/O errors (reading input, writing artifacts)
    Io(std::io::Error),

    /// Malformed JSON text
    Json(serde_json::Error),

    /// CSV writer errors
    Csv(csv::Error),

    /// Input parsed as JSON but is not an array of objects
    InvalidDataset(String),

    /// Operator-supplied parameter rejected before any work was done
    InvalidParameter(String),

    /// Configuration file or override errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl ToolkitError {
    /// Whether an interactive session may report this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }
}

impl fmt::Display for ToolkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
            Self::InvalidDataset(msg) => write!(f, "Invalid dataset: {msg}"),
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ToolkitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ToolkitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ToolkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for ToolkitError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Result type alias for json-toolkit operations.
pub type Result<T> = std::result::Result<T, ToolkitError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ToolkitError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap(msg.into(), e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(f(), e.into()))
    }
}

// Parameter errors stay parameter errors so the interactive loop can still
// tell them apart once context has been attached.
fn wrap(msg: String, err: ToolkitError) -> ToolkitError {
    match err {
        ToolkitError::InvalidParameter(inner) => {
            ToolkitError::InvalidParameter(format!("{msg}: {inner}"))
        }
        other => ToolkitError::Other(format!("{msg}: {other}")),
    }
}
