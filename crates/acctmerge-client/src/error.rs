//! Client construction errors.

/// Errors produced while building an [`HttpAccountClient`](crate::HttpAccountClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service base URL could not be parsed or is not http(s).
    #[error("invalid account service url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("could not build http client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ClientError>;
