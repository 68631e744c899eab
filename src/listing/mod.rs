//! The account listing: rows for the current query and their view model.

pub mod controller;
pub mod model;

pub use controller::{FetchOutcome, ListingController, RowSet};
pub use model::{ListingState, ListingViewModel, compute_listing_view_model};
