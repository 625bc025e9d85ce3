use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("session expired: {0}")]
    SessionExpired(String),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// True when the error is the terminal outcome of a failed session refresh.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired(_))
    }
}
