use std::fmt;

use serde::Serialize;

use search_query::QueryError;

/// Unified error type for the bookshelf crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The query text was absent, blank, or malformed.
    InvalidQuery(String),
    /// Paging parameters were outside their declared bounds.
    InvalidPage(String),
    /// A single-record lookup found nothing.
    NotFound(String),
    /// A backing store failed to answer.
    Store(String),
    /// Internal error.
    Internal(String),
}

impl ServiceError {
    /// Status code an HTTP layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::InvalidQuery(_) | ServiceError::InvalidPage(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Store(_) | ServiceError::Internal(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::InvalidQuery(msg)
            | ServiceError::InvalidPage(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Store(msg)
            | ServiceError::Internal(msg) => msg,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            status: "error",
            message: self.message().to_string(),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidQuery(msg) => write!(f, "invalid query: {msg}"),
            ServiceError::InvalidPage(msg) => write!(f, "invalid page: {msg}"),
            ServiceError::NotFound(msg) => write!(f, "not found: {msg}"),
            ServiceError::Store(msg) => write!(f, "store error: {msg}"),
            ServiceError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<QueryError> for ServiceError {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::InvalidQuery(msg) => ServiceError::InvalidQuery(msg),
        }
    }
}

/// Error payload handed to outer layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

/// Result type alias using [`ServiceError`].
pub type ServiceResult<T> = Result<T, ServiceError>;
