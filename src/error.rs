// src/error.rs

//! Unified error handling for the harvester.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Could not reach the server
    #[error("Connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Crawler configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Dataset directory failed validation
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Ambient settings failed sanity checks
    #[error("Validation error: {0}")]
    Validation(String),

    /// Article page or document did not have the expected structure
    #[error("Parse error for {context}: {message}")]
    Parse { context: String, message: String },

    /// Document text extraction failed
    #[error("Text extraction failed for {0}")]
    Extraction(String),

    /// Morphological analyzer failed
    #[error("Analyzer error: {0}")]
    Analyzer(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a parse error with context.
    pub fn parse(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a connection error for `url`.
    pub fn connection(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Connection {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an analyzer error.
    pub fn analyzer(message: impl fmt::Display) -> Self {
        Self::Analyzer(message.to_string())
    }

    /// Whether the error came from the network layer.
    ///
    /// The crawler abandons the current branch on these instead of failing.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Http(_))
    }
}

/// Rejections raised while validating the crawler configuration file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Seed URL list missing, empty, or containing a non-http(s) entry
    #[error("Seed URL does not match standard pattern: {0}")]
    IncorrectUrl(String),

    /// Article count missing, not an integer, or not positive
    #[error("Total number of articles to parse is not a positive integer: {0}")]
    IncorrectNumberOfArticles(String),

    /// Article count above the supported maximum
    #[error("Total number of articles to parse is too big: {0}")]
    NumberOfArticlesOutOfRange(u64),
}

/// Why a dataset directory is inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InconsistencyReason {
    EmptyFile,
    MetaNumbering,
    RawNumbering,
    UnevenCounts,
    MissingId,
}

impl fmt::Display for InconsistencyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::EmptyFile => "empty file",
            Self::MetaNumbering => "meta files should be listed 1 to N",
            Self::RawNumbering => "raw files should be listed 1 to N",
            Self::UnevenCounts => "uneven number of meta and text files",
            Self::MissingId => "file name contains no id",
        };
        f.write_str(reason)
    }
}

/// Rejections raised while validating a dataset directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("Dataset directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Dataset path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Dataset directory is empty: {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("Inconsistent dataset: {0}")]
    Inconsistent(InconsistencyReason),
}
