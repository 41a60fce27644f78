//! Error types for the researcher tools and the backend client.

use thiserror::Error;

/// Typed errors from the GPT Researcher backend client.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized - check GPTR_API_KEY")]
    Unauthorized,

    #[error("Rate limited - too many requests")]
    RateLimited,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error ({0}): {1}")]
    Server(u16, String),

    #[error("HTTP error ({0}): {1}")]
    Http(u16, String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl EngineError {
    /// Check if this error is retryable
    pub(crate) fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::Timeout
                | EngineError::Connection(_)
                | EngineError::RateLimited
                | EngineError::Server(_, _)
        )
    }
}

/// Errors surfaced by the researcher tools.
///
/// Engine failures of any kind collapse into [`ToolError::ReportGeneration`]
/// with the original message preserved; the remaining variants are input
/// rejections that never reach the engine.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Error generating report: {0}")]
    ReportGeneration(String),

    #[error("Query must not be empty")]
    EmptyQuery,
}

impl From<EngineError> for ToolError {
    fn from(e: EngineError) -> Self {
        ToolError::ReportGeneration(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_retryable() {
        assert!(EngineError::Timeout.is_retryable());
        assert!(EngineError::RateLimited.is_retryable());
        assert!(EngineError::Server(500, "".to_string()).is_retryable());
        assert!(EngineError::Connection("refused".to_string()).is_retryable());

        assert!(!EngineError::Unauthorized.is_retryable());
        assert!(!EngineError::BadRequest("invalid".to_string()).is_retryable());
        assert!(!EngineError::Parse("truncated".to_string()).is_retryable());
    }

    #[test]
    fn test_engine_error_to_tool_error_preserves_message() {
        let error: ToolError = EngineError::Server(503, "quota exhausted".to_string()).into();
        let message = error.to_string();
        assert!(message.starts_with("Error generating report:"));
        assert!(message.contains("quota exhausted"));
    }

    #[test]
    fn test_empty_query_display() {
        assert_eq!(ToolError::EmptyQuery.to_string(), "Query must not be empty");
    }
}
