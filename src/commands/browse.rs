//! Interactive listing: the listing page driven by line commands.

use std::io::{self, Write};
use std::sync::Arc;

use owo_colors::OwoColorize;

use super::http_provider;
use crate::config::Config;
use crate::display::{TerminalPrompt, render_listing};
use crate::error::{ContasError, Result};
use crate::mutation::SystemClock;
use crate::query::store::LISTING_ROUTE;
use crate::query::{QueryState, QueryStateCodec, QueryStateStore, UrlQueryCodec};
use crate::remote::AccountsProvider;
use crate::session::{ListingSession, NEW_ENTRY_ROUTE, edit_route};
use crate::types::AccountId;

const HELP: &str = "\
/texto   pesquisar (/ limpa a pesquisa)
n, p     próxima / página anterior
g N      ir para a página N
b, f     voltar / avançar no histórico
d ID     apagar conta
pay ID   marcar conta como paga
e ID     editar conta
new      nova conta
r        recarregar
q        sair";

/// One line typed in browse mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    NextPage,
    PreviousPage,
    GoToPage(u32),
    Back,
    Forward,
    Delete(AccountId),
    Pay(AccountId),
    Edit(AccountId),
    New,
    Refresh,
    Help,
    Quit,
}

fn parse_id(arg: Option<&str>, command: &str) -> Result<AccountId> {
    let arg = arg.ok_or_else(|| ContasError::InvalidInput(format!("'{command}' needs an id")))?;
    arg.parse()
        .map_err(|_| ContasError::InvalidInput(format!("invalid id '{arg}'")))
}

/// Parse a browse-mode line
pub fn parse_browse_command(line: &str) -> Result<BrowseCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(text) = line.strip_prefix('/') {
        return Ok(BrowseCommand::Search(text.to_string()));
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let arg = parts.next();

    let parsed = match command {
        "n" => BrowseCommand::NextPage,
        "p" => BrowseCommand::PreviousPage,
        "g" => {
            let arg = arg.ok_or_else(|| ContasError::InvalidQuery("'g' needs a page".into()))?;
            let page = arg
                .parse()
                .map_err(|_| ContasError::InvalidQuery(format!("invalid page '{arg}'")))?;
            BrowseCommand::GoToPage(page)
        }
        "b" => BrowseCommand::Back,
        "f" => BrowseCommand::Forward,
        "d" => BrowseCommand::Delete(parse_id(arg, command)?),
        "pay" => BrowseCommand::Pay(parse_id(arg, command)?),
        "e" => BrowseCommand::Edit(parse_id(arg, command)?),
        "new" => BrowseCommand::New,
        "r" | "" => BrowseCommand::Refresh,
        "?" | "h" | "help" => BrowseCommand::Help,
        "q" | "quit" => BrowseCommand::Quit,
        other => {
            return Err(ContasError::InvalidInput(format!(
                "unknown command '{other}', type ? for help"
            )));
        }
    };
    Ok(parsed)
}

/// Location a browse session starts from
fn initial_location(search: Option<String>, page: Option<u32>) -> String {
    if search.is_none() && page.is_none() {
        return LISTING_ROUTE.to_string();
    }
    let query = QueryState::new(search.unwrap_or_default(), page.unwrap_or(1));
    format!("{LISTING_ROUTE}?{}", UrlQueryCodec.encode(&query))
}

async fn read_line() -> Result<Option<String>> {
    let line = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        Ok::<_, io::Error>((read > 0).then_some(line))
    })
    .await
    .map_err(|e| ContasError::Io(io::Error::other(e)))??;
    Ok(line)
}

async fn apply<P: AccountsProvider + 'static>(
    session: &mut ListingSession<P>,
    command: BrowseCommand,
) {
    match command {
        BrowseCommand::Search(text) => {
            session.search(&text);
        }
        BrowseCommand::NextPage => {
            session.next_page();
        }
        BrowseCommand::PreviousPage => {
            session.previous_page();
        }
        BrowseCommand::GoToPage(page) => {
            session.go_to_page(page);
        }
        BrowseCommand::Back => {
            if session.back().is_none() {
                eprintln!("{}", "nothing to go back to".dimmed());
            }
        }
        BrowseCommand::Forward => {
            if session.forward().is_none() {
                eprintln!("{}", "nothing to go forward to".dimmed());
            }
        }
        BrowseCommand::Delete(id) => {
            session.delete_entry(id).await;
        }
        BrowseCommand::Pay(id) => {
            session.mark_paid(id).await;
        }
        BrowseCommand::Edit(id) => println!("{}", edit_route(id).cyan()),
        BrowseCommand::New => println!("{}", NEW_ENTRY_ROUTE.cyan()),
        BrowseCommand::Refresh => session.refresh(),
        BrowseCommand::Help => println!("{HELP}"),
        BrowseCommand::Quit => {}
    }
}

/// Browse the listing interactively until `q` or end of input
pub async fn cmd_browse(search: Option<String>, page: Option<u32>) -> Result<()> {
    let config = Config::load()?;
    let provider = http_provider(&config)?;
    let store = QueryStateStore::from_location(initial_location(search, page));

    let mut session = ListingSession::new(
        provider,
        Arc::new(TerminalPrompt),
        Arc::new(SystemClock),
        store,
        &config,
    );
    session.mount();

    loop {
        let view = session.settled().await;
        println!("{}", render_listing(&view, &config.messages));
        print!("{} ", ">".cyan());
        io::stdout().flush()?;

        let Some(line) = read_line().await? else {
            break;
        };
        match parse_browse_command(&line) {
            Ok(BrowseCommand::Quit) => break,
            Ok(command) => apply(&mut session, command).await,
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }

    session.teardown();
    Ok(())
}
