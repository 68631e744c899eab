pub mod cli;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod display;
pub mod error;
pub mod listing;
pub mod mutation;
pub mod paths;
pub mod prompt;
pub mod query;
pub mod remote;
pub mod session;
pub mod types;

pub use config::{Config, DeleteReconcile, Messages, PaymentReconcile, ReconcileConfig};
pub use debounce::Debouncer;
pub use error::{ContasError, Result};
pub use listing::{
    FetchOutcome, ListingController, ListingState, ListingViewModel, RowSet,
    compute_listing_view_model,
};
pub use mutation::{Clock, MutationController, MutationOutcome, SystemClock};
pub use prompt::{Notice, NoticeLevel, UserPrompt};
pub use query::{
    History, Navigator, QueryState, QueryStateCodec, QueryStateStore, UrlQueryCodec,
};
pub use remote::{AccountsProvider, HttpProvider};
pub use session::{ListingSession, NEW_ENTRY_ROUTE, edit_route};
pub use types::{AccountId, AccountListingEntry, ListingRequest, ListingResult, PaymentUpdate};
