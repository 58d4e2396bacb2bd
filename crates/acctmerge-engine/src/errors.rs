//! Merge error model.
//!
//! Every variant here is fatal for the whole run. Per-row lookup failures are
//! not represented: they degrade the affected row and are only logged.

use std::fmt;

use acctmerge_types::INPUT_HEADER;

/// Stream position an I/O failure happened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePhase {
    Header,
    Row,
}

impl fmt::Display for MergePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Header => "header",
            Self::Row => "row",
        };
        f.write_str(s)
    }
}

/// Fatal error aborting a merge run.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Input header does not match the expected columns exactly.
    #[error("invalid header: expected {:?}, found {found:?}", INPUT_HEADER)]
    InvalidHeader { found: Vec<String> },

    /// Input could not be read or decoded.
    #[error("could not read {phase}: {source}")]
    Read {
        phase: MergePhase,
        source: csv::Error,
    },

    /// Output could not be written.
    #[error("could not write {phase}: {source}")]
    Write {
        phase: MergePhase,
        source: csv::Error,
    },

    /// Buffered output could not be flushed to the underlying writer.
    #[error("could not flush to writer: {0}")]
    Flush(#[source] std::io::Error),

    /// The run was cancelled before the whole input was dispatched.
    #[error("merge cancelled")]
    Cancelled,

    /// A row, reader or writer task panicked, or the writer stopped early.
    #[error("row task failed: {0}")]
    TaskFailed(String),
}

impl MergeError {
    /// Returns `true` for the cancellation variant.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
