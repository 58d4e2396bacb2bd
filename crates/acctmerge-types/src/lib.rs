//! Shared acctmerge row, account, and lookup error types.
//!
//! This crate has no I/O of its own; both the lookup client and the merge
//! engine depend on it.

#![warn(clippy::pedantic)]

pub mod account;
pub mod error;
pub mod row;

pub use account::{Account, AccountList};
pub use error::{LookupError, LookupErrorKind};
pub use row::{InputRow, OutputRow, INPUT_HEADER, OUTPUT_HEADER};
