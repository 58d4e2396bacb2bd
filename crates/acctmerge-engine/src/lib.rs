//! Streaming account merge: reads account rows, enriches each one with live
//! status from the account service under a concurrency cap, and writes the
//! augmented rows.

#![warn(clippy::pedantic)]

pub mod codec;
pub mod config;
pub mod errors;
pub mod merge;
pub mod result;

// Re-export public API for convenience
pub use errors::{MergeError, MergePhase};
pub use merge::{MergeEngine, DEFAULT_MAX_CONCURRENT_LOOKUPS};
pub use result::MergeSummary;
