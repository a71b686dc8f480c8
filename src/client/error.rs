/// Failure taxonomy for remote data operations.
///
/// Every variant is handled at the call site that issued the request;
/// nothing propagates to a global handler and nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Credentials rejected or session token invalid/expired.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The backend rejected the submitted record data.
    #[error("invalid record data: {0}")]
    Validation(String),

    /// The addressed record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("network failure: {0}")]
    Network(String),

    /// The backend answered with a payload we could not decode.
    #[error("malformed response: {0}")]
    Decode(String),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode(error.to_string())
        } else {
            ClientError::Network(error.to_string())
        }
    }
}
