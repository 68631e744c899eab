#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use contas::config::Config;
use contas::error::{ContasError, Result};
use contas::listing::ListingController;
use contas::mutation::Clock;
use contas::prompt::{Notice, UserPrompt};
use contas::remote::AccountsProvider;
use contas::types::{AccountId, AccountListingEntry, ListingRequest, ListingResult, PaymentUpdate};
use jiff::civil::{Date, date};
use parking_lot::Mutex;
use rust_decimal::Decimal;

/// Build an unpaid entry with the given id and title
pub fn entry(id: AccountId, title: &str) -> AccountListingEntry {
    AccountListingEntry {
        id,
        holder_tax_id: format!("000.000.000-{:02}", id % 100),
        title: title.to_string(),
        amount: Decimal::new(10000, 2),
        amount_with_late_interest: Decimal::new(10350, 2),
        due_date: date(2024, 4, 1),
        is_overdue: true,
        daily_late_interest_rate: Decimal::new(1, 1),
        payment_date: None,
    }
}

/// `count` entries titled "Conta {id}", ids starting at 1
pub fn entries(count: u64) -> Vec<AccountListingEntry> {
    (1..=count).map(|id| entry(id, &format!("Conta {id}"))).collect()
}

/// Config with the stock page size and debounce delay
pub fn test_config() -> Config {
    Config::default()
}

/// In-memory accounts API
///
/// Searches match titles case-insensitively and pages are cut the way the
/// real endpoint does. Latency and failures can be scripted per search text.
#[derive(Default)]
pub struct FakeProvider {
    data: Mutex<Vec<AccountListingEntry>>,
    list_calls: Mutex<Vec<ListingRequest>>,
    delays: Mutex<HashMap<String, Duration>>,
    failing_searches: Mutex<HashMap<String, String>>,
    list_failures: Mutex<VecDeque<String>>,
    delete_failure: Mutex<Option<String>>,
    payment_failure: Mutex<Option<String>>,
    deleted: Mutex<Vec<AccountId>>,
    payments: Mutex<Vec<(AccountId, PaymentUpdate)>>,
}

impl FakeProvider {
    pub fn with_entries(data: Vec<AccountListingEntry>) -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(data),
            ..Default::default()
        })
    }

    /// Responses for `search_text` take `delay`
    pub fn delay_search(&self, search_text: &str, delay: Duration) {
        self.delays.lock().insert(search_text.to_string(), delay);
    }

    /// Every listing for `search_text` fails with `message`
    pub fn fail_search(&self, search_text: &str, message: &str) {
        self.failing_searches
            .lock()
            .insert(search_text.to_string(), message.to_string());
    }

    /// The next listing call fails with `message`
    pub fn fail_next_list(&self, message: &str) {
        self.list_failures.lock().push_back(message.to_string());
    }

    pub fn fail_delete(&self, message: &str) {
        *self.delete_failure.lock() = Some(message.to_string());
    }

    pub fn fail_payment(&self, message: &str) {
        *self.payment_failure.lock() = Some(message.to_string());
    }

    pub fn list_calls(&self) -> Vec<ListingRequest> {
        self.list_calls.lock().clone()
    }

    pub fn last_list_call(&self) -> Option<ListingRequest> {
        self.list_calls.lock().last().cloned()
    }

    pub fn deleted(&self) -> Vec<AccountId> {
        self.deleted.lock().clone()
    }

    pub fn payments(&self) -> Vec<(AccountId, PaymentUpdate)> {
        self.payments.lock().clone()
    }
}

impl AccountsProvider for FakeProvider {
    async fn list_accounts(&self, request: &ListingRequest) -> Result<ListingResult> {
        self.list_calls.lock().push(request.clone());

        let delay = self.delays.lock().get(&request.search_text).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.list_failures.lock().pop_front() {
            return Err(ContasError::Provider(message));
        }
        if let Some(message) = self.failing_searches.lock().get(&request.search_text) {
            return Err(ContasError::Provider(message.clone()));
        }

        let needle = request.search_text.to_lowercase();
        let data = self.data.lock();
        let matches: Vec<_> = data
            .iter()
            .filter(|row| row.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let rows = matches
            .iter()
            .skip(request.offset() as usize)
            .take(request.page_size as usize)
            .cloned()
            .collect();
        Ok(ListingResult::new(rows, matches.len() as u64))
    }

    async fn delete_account(&self, id: AccountId) -> Result<()> {
        if let Some(message) = self.delete_failure.lock().clone() {
            return Err(ContasError::Provider(message));
        }
        self.data.lock().retain(|row| row.id != id);
        self.deleted.lock().push(id);
        Ok(())
    }

    async fn update_payment_status(&self, id: AccountId, update: PaymentUpdate) -> Result<()> {
        if let Some(message) = self.payment_failure.lock().clone() {
            return Err(ContasError::Provider(message));
        }
        if let Some(row) = self.data.lock().iter_mut().find(|row| row.id == id) {
            row.payment_date = Some(update.payment_date);
        }
        self.payments.lock().push((id, update));
        Ok(())
    }
}

/// Prompt that answers from a script and records everything it was shown
pub struct RecordingPrompt {
    answers: Mutex<VecDeque<bool>>,
    default_answer: bool,
    confirmations: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
}

impl RecordingPrompt {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self::answering(true))
    }

    pub fn declining() -> Arc<Self> {
        Arc::new(Self::answering(false))
    }

    fn answering(default_answer: bool) -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
            default_answer,
            confirmations: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn answer_next(&self, answer: bool) {
        self.answers.lock().push_back(answer);
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.lock().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter(|notice| notice.is_error())
            .map(|notice| notice.message.clone())
            .collect()
    }
}

impl UserPrompt for RecordingPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.confirmations.lock().push(message.to_string());
        self.answers
            .lock()
            .pop_front()
            .unwrap_or(self.default_answer)
    }

    fn notify(&self, notice: &Notice) {
        self.notices.lock().push(notice.clone());
    }
}

/// Clock stuck on one day
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

/// Listing controller over `provider` with the stock config
pub fn listing(
    provider: &Arc<FakeProvider>,
    prompt: &Arc<RecordingPrompt>,
    config: &Config,
) -> ListingController<FakeProvider> {
    let prompt: Arc<dyn UserPrompt> = prompt.clone();
    ListingController::new(Arc::clone(provider), prompt, config)
}
