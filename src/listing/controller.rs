//! Fetching and holding the rows for the current query.
//!
//! Every fetch is stamped with a sequence number when it is issued. A
//! response is applied only if no later fetch has resolved yet, and
//! the loading flag clears only when the most recently issued fetch
//! resolves. Search edits are debounced; page and history changes fetch
//! immediately and cancel any search still waiting out its delay.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use jiff::civil::Date;
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::prompt::{Notice, UserPrompt};
use crate::query::QueryState;
use crate::remote::AccountsProvider;
use crate::types::{AccountId, ListingResult};

use super::model::ListingState;

/// What happened to the response of one fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rows and total were replaced
    Applied,
    /// A newer fetch already resolved, or the listing was torn down
    Discarded,
    /// The latest fetch failed; remote failures were shown to the user
    Failed(String),
    /// An older fetch failed after a newer one was issued; only logged
    Superseded,
}

/// Narrow row-set interface used to reconcile mutations into the listing
pub trait RowSet: Send + Sync {
    /// Whether the owning listing is still mounted
    fn is_active(&self) -> bool;

    /// Drop the row with `id`; `total_count` is left unchanged
    fn remove_entry(&self, id: AccountId) -> bool;

    /// Record a payment on the row with `id`
    fn set_payment_date(&self, id: AccountId, date: Date) -> bool;

    /// Fetch the current query again
    fn request_refetch(&self);
}

struct Shared<P> {
    provider: Arc<P>,
    prompt: Arc<dyn UserPrompt>,
    page_size: u32,
    state: Mutex<ListingState>,
    /// Sequence number of the latest issued fetch
    issued: AtomicU64,
    torn_down: AtomicBool,
    /// Bumped on every state change
    changes: watch::Sender<u64>,
}

impl<P: AccountsProvider> Shared<P> {
    fn changed(&self) {
        self.changes.send_modify(|version| *version = version.wrapping_add(1));
    }

    /// Stamp a new fetch and flag the listing as loading
    fn begin(&self, query: &QueryState) -> u64 {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock();
            state.is_loading = true;
            state.requested_query = Some(query.clone());
        }
        self.changed();
        tracing::debug!(
            seq,
            search = query.search_text(),
            page = query.page_number(),
            "listing fetch issued"
        );
        seq
    }

    async fn fetch(&self, seq: u64, query: QueryState) -> FetchOutcome {
        let request = query.to_request(self.page_size);
        let result = self.provider.list_accounts(&request).await;
        self.apply(seq, query, result)
    }

    fn apply(&self, seq: u64, query: QueryState, result: Result<ListingResult>) -> FetchOutcome {
        if self.torn_down.load(Ordering::SeqCst) {
            tracing::debug!(seq, "ignoring listing response after teardown");
            return FetchOutcome::Discarded;
        }

        let is_latest = seq == self.issued.load(Ordering::SeqCst);
        let mut shown = false;
        let outcome = {
            let mut state = self.state.lock();
            match result {
                Ok(listing) => {
                    if seq < state.resolved_seq {
                        tracing::debug!(
                            seq,
                            resolved = state.resolved_seq,
                            "discarding stale listing response"
                        );
                        FetchOutcome::Discarded
                    } else {
                        state.rows = listing.rows;
                        state.total_count = listing.total_count;
                        state.applied_query = Some(query);
                        state.resolved_seq = seq;
                        state.last_error = None;
                        if is_latest {
                            state.is_loading = false;
                        }
                        FetchOutcome::Applied
                    }
                }
                Err(e) if is_latest => {
                    let message = e.to_string();
                    if e.is_provider_error() {
                        tracing::warn!(seq, "listing fetch failed: {message}");
                        shown = true;
                    } else {
                        tracing::error!(seq, "listing fetch failed: {message}");
                    }
                    state.is_loading = false;
                    state.resolved_seq = seq;
                    state.last_error = Some(message.clone());
                    FetchOutcome::Failed(message)
                }
                Err(e) => {
                    tracing::warn!(seq, "superseded listing fetch failed: {e}");
                    FetchOutcome::Superseded
                }
            }
        };

        if shown && let FetchOutcome::Failed(message) = &outcome {
            self.prompt.notify(&Notice::error(message.as_str()));
        }
        self.changed();
        outcome
    }
}

/// Owns the listing rows and keeps them in step with the query
pub struct ListingController<P> {
    shared: Arc<Shared<P>>,
    debouncer: Debouncer,
}

impl<P: AccountsProvider + 'static> ListingController<P> {
    pub fn new(provider: Arc<P>, prompt: Arc<dyn UserPrompt>, config: &Config) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                provider,
                prompt,
                page_size: config.page_size.max(1),
                state: Mutex::new(ListingState::default()),
                issued: AtomicU64::new(0),
                torn_down: AtomicBool::new(false),
                changes,
            }),
            debouncer: Debouncer::new(config.search_debounce()),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.shared.page_size
    }

    /// Fetch `query` once the search debounce delay has passed quietly
    ///
    /// The loading flag is raised right away.
    pub fn refresh(&self, query: QueryState) {
        if self.is_torn_down() {
            return;
        }
        let seq = self.shared.begin(&query);
        let shared = Arc::clone(&self.shared);
        self.debouncer.schedule(async move {
            shared.fetch(seq, query).await;
        });
    }

    /// Fetch `query` now, dropping any debounced fetch still waiting
    pub fn refresh_now(&self, query: QueryState) {
        if self.is_torn_down() {
            return;
        }
        self.debouncer.cancel();
        let seq = self.shared.begin(&query);
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            shared.fetch(seq, query).await;
        });
    }

    /// Fetch `query` now and wait for the response to be handled
    pub async fn load(&self, query: QueryState) -> FetchOutcome {
        if self.is_torn_down() {
            return FetchOutcome::Discarded;
        }
        self.debouncer.cancel();
        let seq = self.shared.begin(&query);
        self.shared.fetch(seq, query).await
    }

    pub fn snapshot(&self) -> ListingState {
        self.shared.state.lock().clone()
    }

    /// Receiver notified whenever the listing state changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.changes.subscribe()
    }

    /// Wait until no fetch is pending or running, then return the state
    pub async fn settled(&self) -> ListingState {
        let mut changes = self.subscribe();
        loop {
            {
                let state = self.shared.state.lock();
                if self.is_torn_down() || (!state.is_loading && !self.debouncer.is_pending()) {
                    return state.clone();
                }
            }
            if changes.changed().await.is_err() {
                return self.snapshot();
            }
        }
    }

    /// Stop applying responses and cancel the pending debounced fetch
    pub fn teardown(&self) {
        if self.shared.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }
        self.debouncer.cancel();
        self.shared.changed();
        tracing::debug!("listing torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.shared.torn_down.load(Ordering::SeqCst)
    }
}

impl<P: AccountsProvider + 'static> RowSet for ListingController<P> {
    fn is_active(&self) -> bool {
        !self.is_torn_down()
    }

    fn remove_entry(&self, id: AccountId) -> bool {
        if self.is_torn_down() {
            return false;
        }
        let removed = {
            let mut state = self.shared.state.lock();
            let before = state.rows.len();
            state.rows.retain(|row| row.id != id);
            state.rows.len() != before
        };
        if removed {
            self.shared.changed();
        }
        removed
    }

    fn set_payment_date(&self, id: AccountId, date: Date) -> bool {
        if self.is_torn_down() {
            return false;
        }
        let patched = {
            let mut state = self.shared.state.lock();
            match state.rows.iter_mut().find(|row| row.id == id) {
                Some(row) => {
                    row.payment_date = Some(date);
                    true
                }
                None => false,
            }
        };
        if patched {
            self.shared.changed();
        }
        patched
    }

    fn request_refetch(&self) {
        let query = {
            let state = self.shared.state.lock();
            state
                .requested_query
                .clone()
                .or_else(|| state.applied_query.clone())
        };
        if let Some(query) = query {
            self.refresh_now(query);
        }
    }
}

impl<P> Drop for ListingController<P> {
    fn drop(&mut self) {
        self.shared.torn_down.store(true, Ordering::SeqCst);
    }
}

impl<P> std::fmt::Debug for ListingController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingController")
            .field("page_size", &self.shared.page_size)
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}
