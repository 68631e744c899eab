//! Query-state store backed by a navigable location.

use super::{QueryState, QueryStateCodec, UrlQueryCodec};

/// Route of the accounts listing
pub const LISTING_ROUTE: &str = "/contas";

/// A navigation primitive holding the current location
pub trait Navigator {
    /// The current location, e.g. `/contas?busca=luz&pagina=2`
    fn location(&self) -> &str;

    /// Navigate to a new location, keeping the previous one reachable
    fn push(&mut self, location: String);

    /// Step back in history. Returns false when there is nothing to go back to.
    fn back(&mut self) -> bool {
        false
    }

    /// Step forward in history. Returns false when already at the newest entry.
    fn forward(&mut self) -> bool {
        false
    }
}

/// In-memory browser-style history
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// Number of entries, including ones ahead of the current position
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(LISTING_ROUTE)
    }
}

impl Navigator for History {
    fn location(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, location: String) {
        // A new navigation drops the forward stack, like a browser does
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    fn forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

/// Projects [`QueryState`] out of the current location and writes changes back
///
/// The store keeps no copy of the state: every read decodes the location.
#[derive(Debug, Clone)]
pub struct QueryStateStore<N = History, C = UrlQueryCodec> {
    navigator: N,
    codec: C,
}

impl QueryStateStore {
    /// Store over a fresh history positioned at `location`
    pub fn from_location(location: impl Into<String>) -> Self {
        Self::new(History::new(location), UrlQueryCodec)
    }
}

impl<N: Navigator, C: QueryStateCodec> QueryStateStore<N, C> {
    pub fn new(navigator: N, codec: C) -> Self {
        Self { navigator, codec }
    }

    /// The state encoded in the current location
    pub fn query(&self) -> QueryState {
        self.codec.decode(self.navigator.location())
    }

    pub fn location(&self) -> &str {
        self.navigator.location()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Replace both fields in a single navigation step
    ///
    /// Setting the state that is already current does not add a history entry.
    pub fn set_query(&mut self, search_text: impl Into<String>, page_number: u32) -> QueryState {
        let next = QueryState::new(search_text, page_number);
        if next == self.query() {
            return next;
        }
        let location = format!("{LISTING_ROUTE}?{}", self.codec.encode(&next));
        self.navigator.push(location);
        next
    }

    /// New search text; always lands on page 1
    pub fn set_search(&mut self, search_text: impl Into<String>) -> QueryState {
        self.set_query(search_text, 1)
    }

    /// Another page of the current search
    pub fn set_page(&mut self, page_number: u32) -> QueryState {
        let current = self.query();
        self.set_query(current.search_text().to_string(), page_number)
    }

    /// Go back in history, returning the restored state
    pub fn back(&mut self) -> Option<QueryState> {
        self.navigator.back().then(|| self.query())
    }

    /// Go forward in history, returning the restored state
    pub fn forward(&mut self) -> Option<QueryState> {
        self.navigator.forward().then(|| self.query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_location_has_no_params() {
        let store = QueryStateStore::from_location(LISTING_ROUTE);
        assert_eq!(store.query(), QueryState::default());
    }

    #[test]
    fn test_set_query_writes_both_fields_in_one_entry() {
        let mut store = QueryStateStore::from_location(LISTING_ROUTE);
        store.set_query("luz", 2);

        assert_eq!(store.navigator().len(), 2);
        assert_eq!(store.location(), "/contas?busca=luz&pagina=2");
        assert_eq!(store.query(), QueryState::new("luz", 2));
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut store = QueryStateStore::from_location("/contas?busca=luz&pagina=3");
        let state = store.set_search("água");
        assert_eq!(state, QueryState::new("água", 1));
        assert_eq!(store.query().page_number(), 1);
    }

    #[test]
    fn test_unchanged_state_adds_no_history() {
        let mut store = QueryStateStore::from_location("/contas?busca=luz&pagina=1");
        store.set_search("luz");
        store.set_page(1);
        assert_eq!(store.navigator().len(), 1);
    }

    #[test]
    fn test_back_and_forward_restore_previous_states() {
        let mut store = QueryStateStore::from_location(LISTING_ROUTE);
        store.set_search("luz");
        store.set_page(2);

        assert_eq!(store.back(), Some(QueryState::new("luz", 1)));
        assert_eq!(store.back(), Some(QueryState::default()));
        assert_eq!(store.back(), None);
        assert_eq!(store.forward(), Some(QueryState::new("luz", 1)));
    }

    #[test]
    fn test_push_after_back_drops_forward_entries() {
        let mut store = QueryStateStore::from_location(LISTING_ROUTE);
        store.set_search("a");
        store.set_search("b");
        store.back();
        store.set_search("c");

        assert_eq!(store.forward(), None);
        assert_eq!(store.navigator().len(), 3);
        assert_eq!(store.query().search_text(), "c");
    }
}
