use shuk_types::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,

    #[error("not signed in")]
    SignedOut,

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("server returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(reqwest::Error),

    #[error("transport error: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_decode() {
            ClientError::Decode(e)
        } else {
            ClientError::Transport(e)
        }
    }
}
