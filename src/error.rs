//! Error type shared by the signing pipeline, the transports and the timeline helper.

use thiserror::Error as ThisError;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, ThisError)]
pub enum Error {
    /// A client was constructed with an empty credential.
    #[error("credential `{field}` must not be empty")]
    InvalidCredentials { field: &'static str },
    /// A convenience entry point was called before every credential was populated.
    #[error("credential `{field}` is missing; make sure all four OAuth credentials are set")]
    IncompleteCredentials { field: &'static str },
    /// Only GET and POST can be signed.
    #[error("request method must be either POST or GET, got `{method}`")]
    UnsupportedMethod { method: String },
    #[error("invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    /// HMAC refused the signing key.
    #[error("failed to initialize HMAC-SHA1 with the signing key")]
    Signing,
    /// Network, TLS or timeout failure reported by the transport; never retried here.
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The API answered with an `errors` payload instead of data.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },
}

impl Error {
    pub(crate) fn transport(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Transport(Box::new(e))
    }
}
