//! Account lookup trait definition.
//!
//! [`AccountLookup`] is the only surface the merge engine sees of the remote
//! service. Model types live in [`acctmerge_types`].

use acctmerge_types::{Account, LookupError};
use async_trait::async_trait;

/// Read access to the remote account service.
///
/// Implementations must be `Send + Sync` for use behind `Arc<dyn AccountLookup>`.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Look up a single account by its identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] when the account is missing, the service is
    /// unreachable, or the response cannot be decoded.
    async fn get_account(&self, account_id: &str) -> Result<Account, LookupError>;

    /// List every account known to the service.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] on transport or decode failure.
    async fn list_accounts(&self) -> Result<Vec<Account>, LookupError>;
}
