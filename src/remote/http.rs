//! REST implementation of [`AccountsProvider`].
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Operation               | Request                                         |
//! |-------------------------|-------------------------------------------------|
//! | list accounts           | `GET contas?busca=<text>&pagina=<n>&limite=<size>` |
//! | delete account          | `DELETE contas/{id}`                            |
//! | update payment status   | `PUT contas/{id}/pagamento` `{"dataPagamento": "YYYY-MM-DD"}` |
//!
//! The listing body is either a JSON array of accounts, with the total in the
//! `x-total-count` header, or a `{"data": [...], "totalCount": n}` envelope.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::error::{ContasError, Result};
use crate::query::{PAGE_PARAM, SEARCH_PARAM};
use crate::types::{AccountId, AccountListingEntry, ListingRequest, ListingResult, PaymentUpdate};

use super::{AccountsProvider, ApiError};

const ACCOUNTS_PATH: &str = "contas";
const PAYMENT_PATH: &str = "pagamento";
const LIMIT_PARAM: &str = "limite";
const TOTAL_COUNT_HEADER: &str = "x-total-count";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Accounts API client
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ContasError::Config(format!(
                "base_url '{base_url}' cannot be used as a base URL"
            )));
        }

        // The client timeout covers the whole exchange, body included
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(CONNECT_TIMEOUT))
            .build()
            .map_err(|e| ContasError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Create a provider from config, honouring `CONTAS_BASE_URL`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base_url(), config.remote_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/contas/<segments...>`
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ContasError::Config(format!(
                    "base_url '{}' cannot be used as a base URL",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(ACCOUNTS_PATH)
            .extend(segments);
        Ok(url)
    }

    fn transport_error(&self, error: reqwest::Error) -> ContasError {
        if error.is_timeout() {
            ContasError::RemoteTimeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            error.into()
        }
    }

    /// Send a request, turning failures into errors
    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let error = ApiError::from_response(response).await;
            tracing::warn!(status = %error.status, "accounts API error: {}", error.message);
            return Err(error.into());
        }

        Ok(response)
    }
}

impl AccountsProvider for HttpProvider {
    async fn list_accounts(&self, request: &ListingRequest) -> Result<ListingResult> {
        let url = self.endpoint(&[])?;
        let page = request.page.to_string();
        let limit = request.page_size.to_string();
        tracing::debug!(%url, search = %request.search_text, page = request.page, "listing accounts");

        let response = self
            .execute(self.client.get(url).query(&[
                (SEARCH_PARAM, request.search_text.as_str()),
                (PAGE_PARAM, page.as_str()),
                (LIMIT_PARAM, limit.as_str()),
            ]))
            .await?;

        let total_header = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        parse_listing(&body, total_header.as_deref())
    }

    async fn delete_account(&self, id: AccountId) -> Result<()> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str()])?;
        tracing::debug!(%url, "deleting account");
        self.execute(self.client.delete(url)).await?;
        Ok(())
    }

    async fn update_payment_status(&self, id: AccountId, update: PaymentUpdate) -> Result<()> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str(), PAYMENT_PATH])?;
        tracing::debug!(%url, payment_date = %update.payment_date, "updating payment status");
        self.execute(self.client.put(url).json(&update)).await?;
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListingBody {
    Rows(Vec<AccountListingEntry>),
    Envelope(ListingResult),
}

/// Decode a listing response body
///
/// For a bare array the total comes from the `x-total-count` header, or the
/// number of rows when the header is missing or malformed.
pub fn parse_listing(body: &[u8], total_header: Option<&str>) -> Result<ListingResult> {
    match serde_json::from_slice::<ListingBody>(body)? {
        ListingBody::Envelope(result) => Ok(result),
        ListingBody::Rows(rows) => {
            let total_count = total_header
                .and_then(|value| value.trim().parse::<u64>().ok())
                .unwrap_or(rows.len() as u64);
            Ok(ListingResult::new(rows, total_count))
        }
    }
}
