/// Normalized failure shape for every backend call. Raw transport errors
/// never cross the `BookingApi` boundary; each call resolves to success or
/// exactly one of these.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// Whether retrying the same call later could succeed. Network and
    /// server failures are transient; the rest mean "not permitted" and a
    /// retry with the same input will fail again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Server { .. })
    }
}
