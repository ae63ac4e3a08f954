//! Error types shared by the quote source and its consumers.
//!
//! Every failure of a fetch collapses into `FetchError`, which is the single
//! "fetch failed" outcome seen by the refresh controller. The variants keep the
//! underlying cause around so it can be logged.
use thiserror::Error;

/// Why a fetch of a random quote failed.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure: DNS, connection refused, timeout, broken body stream.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered, but not with a success status.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The body is not JSON or does not have the `{ quotes: [...] }` shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response carried an empty `quotes` list.
    #[error("Empty result: the response contained no quotes")]
    EmptyResult,

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl FetchError {
    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
            FetchError::EmptyResult => "empty",
            FetchError::Client(_) => "client",
        }
    }
}
