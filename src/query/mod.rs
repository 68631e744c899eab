//! Query state for the accounts listing.
//!
//! The navigable location is the single source of truth for the current
//! search text and page number. This module provides the value type
//! ([`QueryState`]), the codec between it and location parameters
//! ([`QueryStateCodec`]), the store that projects state out of a
//! [`Navigator`] and pagination arithmetic.

pub mod pagination;
pub mod store;

use url::form_urlencoded;

use crate::types::ListingRequest;

pub use pagination::{clamp_page, page_count, shows_pagination};
pub use store::{History, Navigator, QueryStateStore};

/// Location parameter carrying the search text
pub const SEARCH_PARAM: &str = "busca";
/// Location parameter carrying the 1-based page number
pub const PAGE_PARAM: &str = "pagina";

/// Current search text and page number
///
/// The page number is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryState {
    search_text: String,
    page_number: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            page_number: 1,
        }
    }
}

impl QueryState {
    /// Build a state, raising a zero page to 1
    pub fn new(search_text: impl Into<String>, page_number: u32) -> Self {
        Self {
            search_text: search_text.into(),
            page_number: page_number.max(1),
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Same state with new search text; a different text resets to page 1
    pub fn with_search(&self, search_text: impl Into<String>) -> Self {
        let search_text = search_text.into();
        if search_text == self.search_text {
            return self.clone();
        }
        Self::new(search_text, 1)
    }

    /// Same search text on another page
    pub fn with_page(&self, page_number: u32) -> Self {
        Self::new(self.search_text.clone(), page_number)
    }

    /// Listing parameters for this state
    pub fn to_request(&self, page_size: u32) -> ListingRequest {
        ListingRequest {
            search_text: self.search_text.clone(),
            page: self.page_number,
            page_size,
        }
    }
}

/// Converts between [`QueryState`] and location query parameters
pub trait QueryStateCodec {
    /// Encode both fields as one query string (without leading `?`)
    fn encode(&self, state: &QueryState) -> String;

    /// Decode a location or bare query string, defaulting missing fields
    fn decode(&self, location: &str) -> QueryState;
}

/// Codec for `?busca=<text>&pagina=<n>` locations
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlQueryCodec;

impl QueryStateCodec for UrlQueryCodec {
    fn encode(&self, state: &QueryState) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(SEARCH_PARAM, &state.search_text)
            .append_pair(PAGE_PARAM, &state.page_number.to_string())
            .finish()
    }

    fn decode(&self, location: &str) -> QueryState {
        let mut search_text: Option<String> = None;
        let mut page_number: Option<u32> = None;

        for (key, value) in form_urlencoded::parse(query_part(location).as_bytes()) {
            match key.as_ref() {
                SEARCH_PARAM if search_text.is_none() => search_text = Some(value.into_owned()),
                PAGE_PARAM if page_number.is_none() => {
                    // Anything that is not a positive integer means the first page
                    page_number = Some(value.trim().parse::<u32>().unwrap_or(1));
                }
                _ => {}
            }
        }

        QueryState::new(search_text.unwrap_or_default(), page_number.unwrap_or(1))
    }
}

/// Extract the query string from a full location, a `?query` or a bare query
fn query_part(location: &str) -> &str {
    let without_fragment = location.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.starts_with('/') => "",
        None => without_fragment,
    }
}
