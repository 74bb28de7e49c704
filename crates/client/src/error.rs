use reqwest::StatusCode;

/// Failure of a single gateway call. Calls are never retried.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be sent or the connection failed.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status {
        status: StatusCode,
        /// Machine-readable code from the error body, when present.
        code: Option<String>,
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, GatewayError::Status { status, .. } if *status == StatusCode::CONFLICT)
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err)
        }
    }
}
