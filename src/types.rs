//! Account records as exchanged with the accounts API.
//!
//! Field names on the wire follow the API (`cpf`, `titulo`, `valor`, ...);
//! the Rust side uses descriptive names.

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Primary key of an account record
pub type AccountId = u64;

/// Read-only projection of one billable account, as listed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountListingEntry {
    pub id: AccountId,
    /// Tax id of whoever owes the account
    #[serde(rename = "cpf")]
    pub holder_tax_id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    /// Nominal value
    #[serde(rename = "valor")]
    pub amount: Decimal,
    /// Value including accrued interest, computed upstream
    #[serde(rename = "valorAtualizadoComJuros")]
    pub amount_with_late_interest: Decimal,
    #[serde(rename = "vencimento")]
    pub due_date: Date,
    #[serde(rename = "contaAtrasada")]
    pub is_overdue: bool,
    /// Percentage charged per day overdue
    #[serde(rename = "taxaDeJurosPorDiasDeAtraso")]
    pub daily_late_interest_rate: Decimal,
    /// `None` while unpaid
    #[serde(rename = "dataPagamento", default)]
    pub payment_date: Option<Date>,
}

impl AccountListingEntry {
    pub fn is_paid(&self) -> bool {
        self.payment_date.is_some()
    }

    /// Interest accrued on top of the nominal amount
    pub fn accrued_interest(&self) -> Decimal {
        self.amount_with_late_interest - self.amount
    }
}

/// One page of accounts plus the server-side count of all matches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingResult {
    /// Rows in server order
    #[serde(rename = "data")]
    pub rows: Vec<AccountListingEntry>,
    /// Matches across all pages, not just `rows`
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

impl ListingResult {
    pub fn new(rows: Vec<AccountListingEntry>, total_count: u64) -> Self {
        Self { rows, total_count }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Parameters sent to the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub search_text: String,
    /// 1-based
    pub page: u32,
    pub page_size: u32,
}

impl ListingRequest {
    /// Number of rows before the requested page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// Body of a payment status update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    #[serde(rename = "dataPagamento")]
    pub payment_date: Date,
}
