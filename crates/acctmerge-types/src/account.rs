//! Account records as served by the remote account service.

use serde::{Deserialize, Serialize};

/// A single account and its current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: u64,
    pub status: String,
    /// When the current status was set.
    pub created_on: String,
}

/// Body of the account listing endpoint.
///
/// The service also returns `next`/`previous` paging links; they are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountList {
    #[serde(alias = "Results", default)]
    pub results: Vec<Account>,
}
