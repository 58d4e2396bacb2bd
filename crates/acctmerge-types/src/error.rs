//! Per-account lookup failures.
//!
//! A [`LookupError`] never aborts a merge run; the affected row is written
//! with blank status fields and the failure is logged.

use std::fmt;

/// Failure looking up a single account (or the account listing).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The service has no account with this identifier.
    #[error("account '{account_id}' not found: {detail}")]
    NotFound { account_id: String, detail: String },

    /// The service could not be reached (connect failure, timeout).
    #[error("account service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a body that could not be decoded.
    #[error("could not decode response from the account service: {0}")]
    Decode(String),

    /// Any other rejected request.
    #[error("could not look up account: {0}")]
    Other(String),
}

/// Field-less mirror of [`LookupError`] for structured log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupErrorKind {
    NotFound,
    Unreachable,
    Decode,
    Other,
}

impl fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotFound => "not_found",
            Self::Unreachable => "unreachable",
            Self::Decode => "decode",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

impl LookupError {
    #[must_use]
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            Self::NotFound { .. } => LookupErrorKind::NotFound,
            Self::Unreachable(_) => LookupErrorKind::Unreachable,
            Self::Decode(_) => LookupErrorKind::Decode,
            Self::Other(_) => LookupErrorKind::Other,
        }
    }
}
