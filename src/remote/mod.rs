//! Remote accounts data provider.
//!
//! The listing and mutation controllers only depend on the
//! [`AccountsProvider`] contract; [`http::HttpProvider`] is the REST
//! implementation used by the binary.

pub mod error;
pub mod http;

use std::future::Future;

use crate::error::Result;
use crate::types::{AccountId, ListingRequest, ListingResult, PaymentUpdate};

pub use error::ApiError;
pub use http::HttpProvider;

/// Operations consumed from the accounts API
pub trait AccountsProvider: Send + Sync {
    /// Fetch one page of accounts matching the search text
    fn list_accounts(
        &self,
        request: &ListingRequest,
    ) -> impl Future<Output = Result<ListingResult>> + Send;

    /// Delete an account
    fn delete_account(&self, id: AccountId) -> impl Future<Output = Result<()>> + Send;

    /// Record the payment of an account
    fn update_payment_status(
        &self,
        id: AccountId,
        update: PaymentUpdate,
    ) -> impl Future<Output = Result<()>> + Send;
}
