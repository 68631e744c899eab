//! Listing model types for testable state management
//!
//! This module separates the fetched state ([`ListingState`]) from what the
//! presentation layer renders ([`ListingViewModel`]), so the view rules can be
//! tested without a terminal.

use crate::query::{QueryState, page_count, shows_pagination};
use crate::types::{AccountId, AccountListingEntry};

// ============================================================================
// State Types
// ============================================================================

/// Rows and flags owned by the listing controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingState {
    /// Rows of the most recently applied response
    pub rows: Vec<AccountListingEntry>,
    /// Total matches reported by that response
    pub total_count: u64,
    /// True while the latest issued fetch has not resolved
    pub is_loading: bool,
    /// Query the current rows were fetched for, `None` before the first load
    pub applied_query: Option<QueryState>,
    /// Query of the latest issued fetch
    pub requested_query: Option<QueryState>,
    /// Message of the last failed fetch, cleared by the next success
    pub last_error: Option<String>,
    /// Highest sequence number that was applied or failed as the latest fetch
    pub resolved_seq: u64,
}

impl ListingState {
    pub fn has_loaded(&self) -> bool {
        self.applied_query.is_some()
    }

    pub fn row(&self, id: AccountId) -> Option<&AccountListingEntry> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Number of pages for the current total and `page_size`
    pub fn page_count(&self, page_size: u32) -> u32 {
        page_count(self.total_count, page_size)
    }
}

// ============================================================================
// View Model Types
// ============================================================================

/// Everything the listing page renders
#[derive(Debug, Clone, PartialEq)]
pub struct ListingViewModel {
    pub rows: Vec<AccountListingEntry>,
    pub total_count: u64,
    pub is_loading: bool,
    pub search_text: String,
    pub current_page: u32,
    pub page_size: u32,
    pub page_count: u32,
    /// Pagination controls appear only when there is more than one page
    pub show_pagination: bool,
    /// The empty caption appears when nothing matched and no fetch is running
    pub show_empty_state: bool,
}

impl ListingViewModel {
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.page_count
    }
}

/// Compute the view model from the listing state and the query in the location
pub fn compute_listing_view_model(
    state: &ListingState,
    query: &QueryState,
    page_size: u32,
) -> ListingViewModel {
    ListingViewModel {
        rows: state.rows.clone(),
        total_count: state.total_count,
        is_loading: state.is_loading,
        search_text: query.search_text().to_string(),
        current_page: query.page_number(),
        page_size,
        page_count: page_count(state.total_count, page_size),
        show_pagination: shows_pagination(state.total_count, page_size),
        show_empty_state: state.total_count == 0 && !state.is_loading,
    }
}
