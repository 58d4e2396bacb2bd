//! HTTP implementation of [`AccountLookup`] over the account service's JSON API.
//!
//! Requests go to `{base}/v1/accounts` and `{base}/v1/accounts/{id}`. The
//! account identifier is appended as a single percent-encoded path segment.

use std::time::Duration;

use acctmerge_types::{Account, AccountList, LookupError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::error::{self, ClientError};
use crate::lookup::AccountLookup;

/// Path of the account collection, relative to the service root.
pub const ACCOUNTS_ENDPOINT: &str = "/v1/accounts";

/// Per-request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body returned by the service on non-200 responses.
#[derive(Debug, Deserialize)]
struct ResponseError {
    #[serde(default)]
    detail: String,
}

/// Parse and check a service root URL.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] unless `base_url` is an absolute
/// `http` or `https` URL.
pub fn parse_base_url(base_url: &str) -> error::Result<Url> {
    let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(parsed)
}

/// Account service client backed by a shared `reqwest` connection pool.
///
/// Cheap to share: wrap in an `Arc` and hand out `Arc<dyn AccountLookup>`.
#[derive(Debug, Clone)]
pub struct HttpAccountClient {
    client: Client,
    base_url: Url,
}

impl HttpAccountClient {
    /// Create a client rooted at `base_url` (e.g. `http://accounts.internal/`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` does not parse as an
    /// http(s) URL, or [`ClientError::Build`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> error::Result<Self> {
        let parsed = parse_base_url(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Root URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, account_id: Option<&str>) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                LookupError::Other(format!("cannot build request path from '{}'", self.base_url))
            })?;
            segments
                .clear()
                .extend(ACCOUNTS_ENDPOINT.trim_start_matches('/').split('/'));
            if let Some(id) = account_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Send a GET and return the body of a 200 response.
    ///
    /// Non-200 responses are decoded as [`ResponseError`] and mapped through
    /// `on_status`.
    async fn get_body(
        &self,
        url: Url,
        on_status: impl FnOnce(StatusCode, String) -> LookupError,
    ) -> Result<bytes::Bytes, LookupError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;

        if status == StatusCode::OK {
            return Ok(body);
        }

        let err: ResponseError =
            serde_json::from_slice(&body).map_err(|e| LookupError::Decode(e.to_string()))?;
        Err(on_status(status, err.detail))
    }
}

#[async_trait]
impl AccountLookup for HttpAccountClient {
    async fn get_account(&self, account_id: &str) -> Result<Account, LookupError> {
        let url = self.endpoint(Some(account_id))?;
        tracing::debug!(account_id, %url, "Looking up account");

        let body = self
            .get_body(url, |status, detail| {
                if status == StatusCode::NOT_FOUND {
                    LookupError::NotFound {
                        account_id: account_id.to_string(),
                        detail,
                    }
                } else {
                    LookupError::Other(format!("{status}: {detail}"))
                }
            })
            .await?;

        serde_json::from_slice(&body).map_err(|e| LookupError::Decode(e.to_string()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, LookupError> {
        let url = self.endpoint(None)?;
        tracing::debug!(%url, "Listing accounts");

        let body = self
            .get_body(url, |status, detail| {
                LookupError::Other(format!("{status}: {detail}"))
            })
            .await?;

        let list: AccountList =
            serde_json::from_slice(&body).map_err(|e| LookupError::Decode(e.to_string()))?;
        Ok(list.results)
    }
}
