use std::fmt;

/// Error types that can occur while running an interview session.
#[derive(Debug)]
pub enum InterviewError {
    /// HTTP request/response errors
    HttpError(String),
    /// Authentication failures, including invalid API keys
    AuthError(String),
    /// API quota or rate limits reported by the LLM provider
    QuotaExceeded(String),
    /// Errors returned by the LLM provider
    ProviderError(String),
    /// JSON serialization/deserialization errors
    JsonError(String),
    /// Invalid configuration or request parameters
    InvalidRequest(String),
    /// Candidate input rejected before any LLM call is made
    InvalidInput(String),
    /// Too many answers submitted in a short interval
    RateLimited {
        /// Milliseconds until the next answer is accepted
        wait_ms: u64,
    },
    /// Catch-all for errors that fit no other category
    Generic(String),
}

impl fmt::Display for InterviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterviewError::HttpError(e) => write!(f, "HTTP Error: {e}"),
            InterviewError::AuthError(e) => write!(f, "Auth Error: {e}"),
            InterviewError::QuotaExceeded(e) => write!(f, "Quota Exceeded: {e}"),
            InterviewError::ProviderError(e) => write!(f, "Provider Error: {e}"),
            InterviewError::JsonError(e) => write!(f, "JSON Parse Error: {e}"),
            InterviewError::InvalidRequest(e) => write!(f, "Invalid Request: {e}"),
            InterviewError::InvalidInput(e) => write!(f, "Invalid Input: {e}"),
            InterviewError::RateLimited { wait_ms } => {
                write!(f, "Rate Limited: wait {wait_ms} ms before the next answer")
            }
            InterviewError::Generic(e) => write!(f, "Error: {e}"),
        }
    }
}

impl std::error::Error for InterviewError {}

/// Converts reqwest HTTP errors into InterviewErrors
impl From<reqwest::Error> for InterviewError {
    fn from(err: reqwest::Error) -> Self {
        InterviewError::HttpError(err.to_string())
    }
}

/// Converts serde_json errors into InterviewErrors
impl From<serde_json::Error> for InterviewError {
    fn from(err: serde_json::Error) -> Self {
        InterviewError::JsonError(err.to_string())
    }
}
