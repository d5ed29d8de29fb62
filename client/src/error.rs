use thiserror::Error;

/// Everything a view-model operation can fail with. Each failure is scoped
/// to the single user action that triggered it; none are fatal and none are
/// retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rejected locally, before any network call.
    #[error("validation: {0}")]
    Validation(&'static str),

    /// The operation needs a logged-in user and none was supplied.
    #[error("login required")]
    AuthRequired,

    /// Transport-level failure (connect, DNS, body read).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` is the body's `error` field when the body
    /// is JSON, otherwise the status canonical reason.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The server payload did not have the shape we expect.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}
