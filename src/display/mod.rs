//! Terminal rendering of the listing page.

pub mod terminal;

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Messages;
use crate::listing::ListingViewModel;
use crate::types::AccountListingEntry;

pub use terminal::TerminalPrompt;

/// Hint for the per-row actions in browse mode
const ROW_ACTIONS: &str = "d e pay";

/// A row in the accounts table
#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Ações")]
    actions: &'static str,
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "Cpf")]
    holder_tax_id: String,
    #[tabled(rename = "Titulo")]
    title: String,
    #[tabled(rename = "Valor")]
    amount: String,
    #[tabled(rename = "valor Atualizado Com Juros")]
    amount_with_late_interest: String,
    #[tabled(rename = "Data vencimento")]
    due_date: String,
    #[tabled(rename = "Conta atrasada")]
    is_overdue: &'static str,
    #[tabled(rename = "Taxa de juros por dia")]
    daily_late_interest_rate: String,
    #[tabled(rename = "Data Pagamento")]
    payment_date: String,
}

impl From<&AccountListingEntry> for AccountRow {
    fn from(entry: &AccountListingEntry) -> Self {
        Self {
            actions: ROW_ACTIONS,
            id: entry.id.to_string(),
            holder_tax_id: entry.holder_tax_id.clone(),
            title: entry.title.clone(),
            amount: format_amount(entry.amount),
            amount_with_late_interest: format_amount(entry.amount_with_late_interest),
            due_date: entry.due_date.to_string(),
            is_overdue: format_overdue(entry.is_overdue),
            daily_late_interest_rate: format_rate(entry.daily_late_interest_rate),
            payment_date: entry
                .payment_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Two decimal places, as money is shown
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

pub fn format_overdue(is_overdue: bool) -> &'static str {
    if is_overdue { "SIM" } else { "NÃO" }
}

/// Plain table of the rows, without colors
pub fn format_accounts_table(rows: &[AccountListingEntry]) -> String {
    let rows: Vec<AccountRow> = rows.iter().map(AccountRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// "Página 2 de 3"
pub fn format_page_indicator(current_page: u32, page_count: u32) -> String {
    format!("Página {current_page} de {page_count}")
}

/// Render the whole listing page: title, search, rows and footer
pub fn render_listing(view: &ListingViewModel, messages: &Messages) -> String {
    let mut out = String::new();

    out.push_str(&messages.listing_title.bold().to_string());
    out.push('\n');

    let search = if view.search_text.is_empty() {
        messages.search_placeholder.dimmed().to_string()
    } else {
        view.search_text.clone()
    };
    out.push_str(&format!("{} {search}\n", "busca:".dimmed()));

    if view.is_loading {
        out.push_str(&format!("{}\n", messages.loading.yellow()));
    }

    if !view.rows.is_empty() {
        out.push_str(&format_accounts_table(&view.rows));
        out.push('\n');
    }

    if view.show_empty_state {
        out.push_str(&format!("{}\n", messages.empty_listing.dimmed()));
    }

    if view.show_pagination {
        let mut footer = format_page_indicator(view.current_page, view.page_count);
        if view.has_previous_page() {
            footer.push_str("  [p] anterior");
        }
        if view.has_next_page() {
            footer.push_str("  [n] próxima");
        }
        out.push_str(&footer.cyan().to_string());
        out.push('\n');
    }

    out.push_str(&format!("{} registro(s)\n", view.total_count));
    out
}

/// Dashboard card with the total number of accounts
pub fn render_total(total_count: Option<u64>, messages: &Messages) -> String {
    let value = match total_count {
        Some(total) => total.to_string().bold().to_string(),
        None => messages.loading.yellow().to_string(),
    };
    format!("{}\n{value}", "Total de contas".bold())
}
