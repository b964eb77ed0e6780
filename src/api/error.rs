use thiserror::Error;

/// Errors surfaced by the backend API client.
///
/// Every call maps transport and HTTP failures into one of these variants;
/// handlers translate them into view states. Nothing is retried here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the backend: {0}")]
    Network(String),

    #[error("the backend did not respond in time")]
    Timeout,

    #[error("authentication required")]
    Unauthorized,

    #[error("not permitted")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("{message}")]
    Validation { message: String },

    #[error("backend error (HTTP {status})")]
    Server { status: u16 },

    #[error("unexpected backend response (HTTP {status})")]
    Unexpected { status: u16, body: String },

    #[error("client setup error: {0}")]
    Client(String),
}

impl ApiError {
    /// Map a reqwest transport error. Timeouts are distinguished so pages
    /// never sit in a loading state past the configured window.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// True when the session token was missing, expired, or rejected.
    /// Callers must clear the stored session and send the user to login.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
