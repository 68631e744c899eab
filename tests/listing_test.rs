#[path = "common/mod.rs"]
mod common;

use std::time::Duration;

use common::{FakeProvider, RecordingPrompt, entries, entry, listing, test_config};
use contas::listing::FetchOutcome;
use contas::query::QueryState;

// ============================================================================
// Loading
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_load_applies_page_and_total() {
    let provider = FakeProvider::with_entries(entries(12));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    let outcome = controller.load(QueryState::new("", 2)).await;

    assert_eq!(outcome, FetchOutcome::Applied);
    let state = controller.snapshot();
    let ids: Vec<_> = state.rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![6, 7, 8, 9, 10]);
    assert_eq!(state.total_count, 12);
    assert!(!state.is_loading);
    assert_eq!(state.applied_query, Some(QueryState::new("", 2)));

    let request = provider.last_list_call().unwrap();
    assert_eq!(request.page, 2);
    assert_eq!(request.page_size, 5);
}

#[tokio::test(start_paused = true)]
async fn test_refreshing_same_query_twice_does_not_duplicate_rows() {
    let provider = FakeProvider::with_entries(entries(3));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.refresh_now(QueryState::default());
    controller.refresh_now(QueryState::default());
    let state = controller.settled().await;

    assert_eq!(state.rows.len(), 3);
    assert_eq!(state.total_count, 3);
    assert_eq!(provider.list_calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_loading_flag_raised_synchronously() {
    let provider = FakeProvider::with_entries(entries(3));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.refresh(QueryState::new("conta", 1));
    assert!(controller.snapshot().is_loading);

    let state = controller.settled().await;
    assert!(!state.is_loading);
}

// ============================================================================
// Debounced search
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_rapid_search_edits_issue_one_fetch() {
    let provider = FakeProvider::with_entries(vec![
        entry(1, "Conta de luz"),
        entry(2, "Conta de água"),
    ]);
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    for text in ["l", "lu", "luz"] {
        controller.refresh(QueryState::new(text, 1));
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let state = controller.settled().await;

    let calls = provider.list_calls();
    assert_eq!(calls.len(), 1, "calls: {calls:?}");
    assert_eq!(calls[0].search_text, "luz");
    assert_eq!(state.rows.len(), 1);
    assert_eq!(state.rows[0].title, "Conta de luz");
}

#[tokio::test(start_paused = true)]
async fn test_search_edits_spaced_beyond_delay_each_fetch() {
    let provider = FakeProvider::with_entries(entries(3));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.refresh(QueryState::new("c", 1));
    controller.settled().await;
    controller.refresh(QueryState::new("co", 1));
    controller.settled().await;

    let searches: Vec<_> = provider
        .list_calls()
        .into_iter()
        .map(|call| call.search_text)
        .collect();
    assert_eq!(searches, vec!["c", "co"]);
}

#[tokio::test(start_paused = true)]
async fn test_immediate_refresh_cancels_pending_search() {
    let provider = FakeProvider::with_entries(entries(3));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.refresh(QueryState::new("conta", 1));
    controller.refresh_now(QueryState::new("", 1));
    controller.settled().await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    let calls = provider.list_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].search_text, "");
}

// ============================================================================
// Response ordering
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_late_response_from_older_query_is_discarded() {
    let provider = FakeProvider::with_entries(vec![
        entry(1, "slow bill"),
        entry(2, "fast bill"),
    ]);
    provider.delay_search("slow", Duration::from_millis(500));
    provider.delay_search("fast", Duration::from_millis(10));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.refresh_now(QueryState::new("slow", 1));
    controller.refresh_now(QueryState::new("fast", 1));
    let state = controller.settled().await;
    assert_eq!(state.rows[0].title, "fast bill");

    tokio::time::sleep(Duration::from_secs(1)).await;

    let state = controller.snapshot();
    assert_eq!(state.rows.len(), 1);
    assert_eq!(state.rows[0].title, "fast bill");
    assert_eq!(state.applied_query, Some(QueryState::new("fast", 1)));
    assert!(!state.is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_loading_stays_until_latest_request_resolves() {
    let provider = FakeProvider::with_entries(vec![
        entry(1, "first bill"),
        entry(2, "second bill"),
    ]);
    provider.delay_search("first", Duration::from_millis(10));
    provider.delay_search("second", Duration::from_millis(500));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.refresh_now(QueryState::new("first", 1));
    controller.refresh_now(QueryState::new("second", 1));

    tokio::time::sleep(Duration::from_millis(50)).await;
    let state = controller.snapshot();
    assert_eq!(state.rows[0].title, "first bill");
    assert!(state.is_loading);

    let state = controller.settled().await;
    assert_eq!(state.rows[0].title, "second bill");
    assert!(!state.is_loading);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_failed_fetch_keeps_rows_and_notifies() {
    let provider = FakeProvider::with_entries(entries(3));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.load(QueryState::default()).await;
    provider.fail_next_list("Erro ao consultar contas");
    let outcome = controller.load(QueryState::new("", 2)).await;

    assert_eq!(
        outcome,
        FetchOutcome::Failed("Erro ao consultar contas".to_string())
    );
    let state = controller.snapshot();
    assert_eq!(state.rows.len(), 3);
    assert_eq!(state.total_count, 3);
    assert!(!state.is_loading);
    assert_eq!(state.last_error.as_deref(), Some("Erro ao consultar contas"));
    assert_eq!(prompt.errors(), vec!["Erro ao consultar contas"]);
}

#[tokio::test(start_paused = true)]
async fn test_failure_of_superseded_request_is_not_shown() {
    let provider = FakeProvider::with_entries(entries(3));
    provider.fail_search("old", "stale failure");
    provider.delay_search("old", Duration::from_millis(200));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.refresh_now(QueryState::new("old", 1));
    controller.refresh_now(QueryState::new("conta", 1));
    controller.settled().await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    let state = controller.snapshot();
    assert!(prompt.notices().is_empty());
    assert!(state.last_error.is_none());
    assert_eq!(state.rows.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_older_response_after_latest_failure_is_discarded() {
    let provider = FakeProvider::with_entries(entries(3));
    provider.delay_search("conta", Duration::from_millis(500));
    provider.fail_search("broken", "server unavailable");
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.refresh_now(QueryState::new("conta", 1));
    controller.refresh_now(QueryState::new("broken", 1));
    controller.settled().await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    let state = controller.snapshot();
    assert!(!state.is_loading);
    assert!(state.rows.is_empty());
    assert!(state.applied_query.is_none());
    assert!(state.last_error.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_success_clears_last_error() {
    let provider = FakeProvider::with_entries(entries(3));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    provider.fail_next_list("offline");
    controller.load(QueryState::default()).await;
    assert!(controller.snapshot().last_error.is_some());

    controller.load(QueryState::default()).await;
    assert!(controller.snapshot().last_error.is_none());
}

// ============================================================================
// Teardown
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_response_after_teardown_is_ignored() {
    let provider = FakeProvider::with_entries(entries(3));
    provider.delay_search("", Duration::from_millis(100));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.refresh_now(QueryState::default());
    tokio::time::sleep(Duration::from_millis(10)).await;
    controller.teardown();
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(provider.list_calls().len(), 1);
    let state = controller.snapshot();
    assert!(state.rows.is_empty());
    assert!(prompt.notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_cancels_pending_search() {
    let provider = FakeProvider::with_entries(entries(3));
    let prompt = RecordingPrompt::accepting();
    let controller = listing(&provider, &prompt, &test_config());

    controller.refresh(QueryState::new("conta", 1));
    controller.teardown();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(provider.list_calls().is_empty());
    assert_eq!(controller.load(QueryState::default()).await, FetchOutcome::Discarded);
    assert!(provider.list_calls().is_empty());
}
