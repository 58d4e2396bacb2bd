//! Remote account service access for acctmerge.
//!
//! Provides the [`AccountLookup`] trait the merge engine fans out over, and
//! an [`HttpAccountClient`] implementation speaking the service's JSON API.

#![warn(clippy::pedantic)]

pub mod error;
pub mod http;
pub mod lookup;

pub use error::ClientError;
pub use http::{parse_base_url, HttpAccountClient, ACCOUNTS_ENDPOINT, DEFAULT_REQUEST_TIMEOUT};
pub use lookup::AccountLookup;
