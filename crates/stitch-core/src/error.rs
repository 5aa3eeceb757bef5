//! Error types for the stitch core library.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Classification of a failed order or bid submission.
///
/// Lets the caller choose between a "try again" message and a "fix your
/// input" message without inspecting status codes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request never got a response (DNS, connection refused, reset)
    Network,
    /// The request timed out waiting for the backend
    Timeout,
    /// The backend answered with a 5xx status
    Server { status: u16 },
    /// The backend rejected the request content with a 4xx status
    Rejected { status: u16 },
}

impl FailureKind {
    /// Classifies an HTTP status code. Only meaningful for non-success codes.
    pub fn from_status(status: u16) -> Self {
        if status >= 500 {
            FailureKind::Server { status }
        } else {
            FailureKind::Rejected { status }
        }
    }

    /// Whether resubmitting the same request unchanged may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FailureKind::Rejected { .. })
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "request timed out"),
            FailureKind::Server { status } => write!(f, "server error ({status})"),
            FailureKind::Rejected { status } => write!(f, "request rejected ({status})"),
        }
    }
}

/// Comprehensive error type for all stitch operations.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Client-side validation errors; never reach the network
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A single bid-status lookup failed
    #[error("Bid lookup for order {order_id} failed: {message}")]
    LookupFailed { order_id: u64, message: String },
    /// Order or bid creation failed in transit or on the backend
    #[error("Submission failed ({kind}): {message}")]
    SubmissionFailed { kind: FailureKind, message: String },
    /// The acting factory already has a bid on this request order
    #[error("A bid for request order {request_order_id} was already submitted")]
    DuplicateBid { request_order_id: u64 },
    /// Read-only API calls that failed (quote list, images)
    #[error("API request failed ({kind}): {message}")]
    Api { kind: FailureKind, message: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Spreadsheet rendering errors
    #[error("Worksheet error: {source}")]
    Worksheet {
        #[from]
        source: rust_xlsxwriter::XlsxError,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> MarketError {
        MarketError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> MarketError {
        MarketError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl MarketError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Whether the operation may succeed if repeated unchanged.
    ///
    /// Duplicate bids and validation problems are never retryable; transport
    /// and server failures are.
    pub fn is_retryable(&self) -> bool {
        match self {
            MarketError::SubmissionFailed { kind, .. } | MarketError::Api { kind, .. } => {
                kind.is_retryable()
            }
            MarketError::LookupFailed { .. } => true,
            _ => false,
        }
    }

    /// Converts a transport-level failure into a read-path API error.
    pub(crate) fn api(kind: FailureKind, message: impl Into<String>) -> Self {
        MarketError::Api {
            kind,
            message: message.into(),
        }
    }

    /// Converts a transport-level failure into a submission error.
    pub(crate) fn submission(kind: FailureKind, message: impl Into<String>) -> Self {
        MarketError::SubmissionFailed {
            kind,
            message: message.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| MarketError::database(message).with_source(e))
    }
}

/// Result type alias for stitch operations
pub type Result<T> = std::result::Result<T, MarketError>;
