use serde_json::json;

use super::{CommandOutput, http_provider};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::display::{render_listing, render_total};
use crate::error::Result;
use crate::listing::{ListingState, compute_listing_view_model};
use crate::query::QueryState;
use crate::remote::AccountsProvider;

/// Print one page of the listing
///
/// A page past the end is clamped to the last page before printing.
pub async fn cmd_ls(search: Option<String>, page: Option<u32>, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let provider = http_provider(&config)?;

    let mut query = QueryState::new(search.unwrap_or_default(), page.unwrap_or(1));
    let mut listing = provider
        .list_accounts(&query.to_request(config.page_size))
        .await?;

    let pages = crate::query::page_count(listing.total_count, config.page_size);
    if listing.total_count > 0 && query.page_number() > pages {
        tracing::debug!(page = query.page_number(), pages, "clamping page to the last page");
        query = query.with_page(pages);
        listing = provider
            .list_accounts(&query.to_request(config.page_size))
            .await?;
    }

    let state = ListingState {
        rows: listing.rows,
        total_count: listing.total_count,
        applied_query: Some(query.clone()),
        ..Default::default()
    };
    let view = compute_listing_view_model(&state, &query, config.page_size);

    let json_output = json!({
        "busca": view.search_text,
        "pagina": view.current_page,
        "totalPaginas": view.page_count,
        "totalCount": view.total_count,
        "data": view.rows,
    });

    CommandOutput::new(json_output)
        .with_text(render_listing(&view, &config.messages))
        .print(output)
}

/// Print the number of registered accounts
pub async fn cmd_total(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let provider = http_provider(&config)?;

    if !output.json {
        eprintln!("{}", render_total(None, &config.messages));
    }
    let listing = provider
        .list_accounts(&QueryState::default().to_request(1))
        .await?;

    CommandOutput::new(json!({ "totalCount": listing.total_count }))
        .with_text(render_total(Some(listing.total_count), &config.messages))
        .print(output)
}
