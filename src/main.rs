use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use contas::cli::{Cli, Commands, ConfigAction};
use contas::commands::{
    cmd_browse, cmd_config_set, cmd_config_show, cmd_delete, cmd_ls, cmd_pay, cmd_total,
};

/// Log to stderr, filtered by `CONTAS_LOG` (default: warn)
fn init_logging() {
    let filter = EnvFilter::try_from_env("CONTAS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ls {
            busca,
            pagina,
            output,
        } => cmd_ls(busca, pagina, output).await,
        Commands::Browse { busca, pagina } => cmd_browse(busca, pagina).await,
        Commands::Delete { id, yes, output } => cmd_delete(id, yes, output).await,
        Commands::Pay { id, yes, output } => cmd_pay(id, yes, output).await,
        Commands::Total { output } => cmd_total(output).await,
        Commands::Config { action } => match action {
            ConfigAction::Show { output } => cmd_config_show(output),
            ConfigAction::Set { key, value, output } => cmd_config_set(&key, &value, output),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
