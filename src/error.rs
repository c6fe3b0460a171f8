//! Error taxonomy for content fetching and page assembly.
//!
//! Every page operation fails with exactly one of these. Nested fetch
//! failures are not retried and surface as the error of the enclosing page.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    /// A required singular lookup matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport failure, timeout, unexpected status or malformed response.
    #[error("content API error: {0}")]
    Upstream(String),

    /// Caller passed an empty or unsafe identifier.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl ContentError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ContentError::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        ContentError::Upstream(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ContentError::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}

impl From<reqwest::Error> for ContentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ContentError::Upstream(format!("request timed out: {}", err))
        } else {
            ContentError::Upstream(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        ContentError::Upstream(format!("malformed response: {}", err))
    }
}
