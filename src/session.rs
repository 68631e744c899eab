//! The listing page: query store, listing controller and mutations wired
//! together.
//!
//! A [`ListingSession`] is what a front end drives. User intents (typing a
//! search, picking a page, going back) update the location first; the
//! listing is then refreshed from the query the location now encodes.

use std::sync::Arc;

use crate::config::Config;
use crate::listing::{
    ListingController, ListingState, ListingViewModel, RowSet, compute_listing_view_model,
};
use crate::mutation::{Clock, MutationController, MutationOutcome};
use crate::prompt::UserPrompt;
use crate::query::store::LISTING_ROUTE;
use crate::query::{
    History, Navigator, QueryState, QueryStateCodec, QueryStateStore, UrlQueryCodec, clamp_page,
};
use crate::remote::AccountsProvider;
use crate::types::AccountId;

/// Route of the form that creates a new account
pub const NEW_ENTRY_ROUTE: &str = "/contas/detalhe/nova";

/// Route of the form that edits account `id`
pub fn edit_route(id: AccountId) -> String {
    format!("{LISTING_ROUTE}/detalhe/{id}")
}

/// Dropping the session drops the listing, so late responses are ignored.
pub struct ListingSession<P, N = History, C = UrlQueryCodec> {
    store: QueryStateStore<N, C>,
    listing: Arc<ListingController<P>>,
    mutations: MutationController<P>,
}

impl<P: AccountsProvider + 'static, N: Navigator, C: QueryStateCodec> ListingSession<P, N, C> {
    pub fn new(
        provider: Arc<P>,
        prompt: Arc<dyn UserPrompt>,
        clock: Arc<dyn Clock>,
        store: QueryStateStore<N, C>,
        config: &Config,
    ) -> Self {
        let listing = Arc::new(ListingController::new(
            Arc::clone(&provider),
            Arc::clone(&prompt),
            config,
        ));
        let rows: Arc<dyn RowSet> = listing.clone();
        let mutations = MutationController::new(provider, prompt, rows, clock, config);
        Self {
            store,
            listing,
            mutations,
        }
    }

    /// Load the rows for the query restored from the location
    pub fn mount(&self) {
        self.listing.refresh_now(self.query());
    }

    pub fn query(&self) -> QueryState {
        self.store.query()
    }

    pub fn location(&self) -> &str {
        self.store.location()
    }

    pub fn store(&self) -> &QueryStateStore<N, C> {
        &self.store
    }

    pub fn listing(&self) -> &ListingController<P> {
        &self.listing
    }

    pub fn snapshot(&self) -> ListingState {
        self.listing.snapshot()
    }

    pub fn view(&self) -> ListingViewModel {
        compute_listing_view_model(&self.listing.snapshot(), &self.query(), self.listing.page_size())
    }

    /// New search text: back to page 1, fetched after the debounce delay
    pub fn search(&mut self, text: &str) -> QueryState {
        let before = self.query();
        if before.search_text() == text {
            return before;
        }
        let after = self.store.set_search(text);
        self.listing.refresh(after.clone());
        after
    }

    /// Move to `page`, clamped to the pages the last response reported
    ///
    /// The clamp only applies while the rows on screen belong to the current
    /// search; otherwise `settled` corrects a page past the end.
    pub fn go_to_page(&mut self, page: u32) -> QueryState {
        let state = self.listing.snapshot();
        let search_text = self.query().search_text().to_string();
        let same_search = state
            .applied_query
            .as_ref()
            .is_some_and(|applied| applied.search_text() == search_text);
        let page = if same_search {
            clamp_page(page, state.page_count(self.listing.page_size()))
        } else {
            page.max(1)
        };

        let before = self.query();
        let after = self.store.set_page(page);
        if after != before {
            self.listing.refresh_now(after.clone());
        }
        after
    }

    pub fn next_page(&mut self) -> QueryState {
        let page = self.query().page_number().saturating_add(1);
        self.go_to_page(page)
    }

    pub fn previous_page(&mut self) -> QueryState {
        let page = self.query().page_number().saturating_sub(1);
        self.go_to_page(page)
    }

    /// Step back in history and load the restored query
    pub fn back(&mut self) -> Option<QueryState> {
        let restored = self.store.back()?;
        self.listing.refresh_now(restored.clone());
        Some(restored)
    }

    /// Step forward in history and load the restored query
    pub fn forward(&mut self) -> Option<QueryState> {
        let restored = self.store.forward()?;
        self.listing.refresh_now(restored.clone());
        Some(restored)
    }

    /// Fetch the current query again, now
    pub fn refresh(&self) {
        self.listing.refresh_now(self.query());
    }

    /// Wait for pending fetches and return the resulting view
    ///
    /// When the response shows the current page lies past the last page,
    /// the location is moved to the last page and that page is loaded.
    pub async fn settled(&mut self) -> ListingViewModel {
        loop {
            let state = self.listing.settled().await;
            if self.listing.is_torn_down() {
                break;
            }

            let query = self.query();
            let pages = state.page_count(self.listing.page_size());
            let out_of_range = state.total_count > 0
                && state.applied_query.as_ref() == Some(&query)
                && query.page_number() > pages;
            if !out_of_range {
                break;
            }

            tracing::debug!(
                page = query.page_number(),
                pages,
                "page past the end, moving to the last page"
            );
            let clamped = self.store.set_page(pages);
            self.listing.refresh_now(clamped);
        }
        self.view()
    }

    pub async fn delete_entry(&self, id: AccountId) -> MutationOutcome {
        self.mutations.delete_entry(id).await
    }

    pub async fn mark_paid(&self, id: AccountId) -> MutationOutcome {
        self.mutations.mark_paid(id).await
    }

    /// Stop all pending work; late responses are ignored afterwards
    pub fn teardown(&self) {
        self.listing.teardown();
    }
}
