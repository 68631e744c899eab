use clap::{Args, Parser, Subcommand};

use crate::types::AccountId;

#[derive(Parser)]
#[command(name = "contas")]
#[command(about = "List, search and settle billable accounts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format flags shared by the one-shot commands
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of accounts
    #[command(visible_alias = "l")]
    Ls {
        /// Search text
        #[arg(short, long)]
        busca: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long)]
        pagina: Option<u32>,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Browse the listing interactively
    #[command(visible_alias = "b")]
    Browse {
        /// Initial search text
        #[arg(short, long)]
        busca: Option<String>,

        /// Initial page number
        #[arg(short, long)]
        pagina: Option<u32>,
    },

    /// Delete an account
    Delete {
        /// Account id
        id: AccountId,

        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Mark an account as paid today
    Pay {
        /// Account id
        id: AccountId,

        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Print the number of registered accounts
    Total {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (e.g. page_size, reconcile.after_payment)
        key: String,
        /// Value to set
        value: String,
        #[command(flatten)]
        output: OutputOptions,
    },
}
