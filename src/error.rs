use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// The upstream service refused the call because of its own quota.
    #[error("Upstream rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("Upstream network error: {0}")]
    NetworkError(String),
    #[error("Upstream service error ({status}): {message}")]
    UpstreamError { status: u16, message: String },
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for GenerationError {
    fn from(e: serde_json::Error) -> Self {
        GenerationError::SerializationError(e.to_string())
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            GenerationError::NetworkError(e.to_string())
        } else if let Some(status) = e.status() {
            GenerationError::UpstreamError {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else if e.is_decode() {
            GenerationError::ResponseError(e.to_string())
        } else {
            GenerationError::RequestError(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
