use thiserror::Error;

/// Unified error type for the client.
///
/// Decode-level problems (malformed frames, unparsable payloads) are deliberately
/// absent: they are recovered locally inside the streaming core by dropping the
/// frame, and never surface to callers.
#[derive(Debug, Error)]
pub enum Error {
    /// No bearer token available. Raised before any network call is issued.
    #[error("not authenticated: no access token available")]
    Auth,

    /// The server answered with a non-success status. Carries the raw error body
    /// so callers can show what the backend actually said.
    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// Network-level failure from the HTTP client (connect, timeout, body read).
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The business envelope came back with a non-zero code.
    #[error("service rejected request (code {code}): {msg}")]
    Api { code: i64, msg: String },

    /// The transport completed but no usable `{text, id}` pair was accumulated.
    #[error("no valid data received from stream")]
    EmptyStream,

    /// The caller cancelled the stream mid-flight.
    #[error("stream cancelled")]
    Cancelled,

    /// A conversation has no final document to fetch.
    #[error("no document content found for this conversation")]
    DocumentMissing,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credential storage failure (keyring backend).
    #[error("credential store error: {0}")]
    CredentialStore(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// True when retrying the same operation could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Transport { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
