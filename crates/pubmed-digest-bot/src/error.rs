//! Error types for the digest bot.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid request URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// HTTP status code carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::NotFound { .. } => Some(404),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Url(_) | Self::Timeout(_) => None,
        }
    }
}

/// Errors from the article fetcher.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The remote document could not be retrieved.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] ClientError),

    /// The remote document did not have the expected shape.
    #[error("Failed to parse source document: {reason}")]
    ParseFailure {
        /// What did not match
        reason: String,
    },

    /// No article matches the requested PMID.
    #[error("No article found for PMID {pmid}")]
    NotFound {
        /// The PMID that was looked up
        pmid: String,
    },

    /// The article exists but carries no abstract.
    #[error("No abstract available for PMID {pmid}")]
    AbstractUnavailable {
        /// The PMID that was looked up
        pmid: String,
    },

    /// The requested date range is malformed or inverted.
    #[error("Invalid date range: {reason}")]
    InvalidRange {
        /// Why the range was rejected
        reason: String,
    },
}

impl FetchError {
    /// Create a parse failure.
    #[must_use]
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::ParseFailure { reason: reason.into() }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(pmid: impl Into<String>) -> Self {
        Self::NotFound { pmid: pmid.into() }
    }

    /// Create an invalid range error.
    #[must_use]
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange { reason: reason.into() }
    }

    /// Convert to the text shown to the chat user.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::SourceUnavailable(_) => {
                "PubMed could not be reached. Please try again later.".to_string()
            }
            Self::ParseFailure { .. } => {
                "PubMed returned a page in an unexpected format. Please try again later."
                    .to_string()
            }
            Self::NotFound { pmid } => format!("Article with PMID {pmid} was not found."),
            Self::AbstractUnavailable { pmid } => format!("No abstract available for PMID {pmid}."),
            Self::InvalidRange { reason } => format!(
                "Invalid date range: {reason}. Please use: YYYY-MM-DD to YYYY-MM-DD\n\
                 Example: 2025-01-01 to 2025-01-31"
            ),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for fetcher operations.
pub type FetchResult<T> = Result<T, FetchError>;
