//! Command implementations behind the `contas` binary.

mod browse;
mod config;
mod ls;
mod mutate;

pub use browse::{BrowseCommand, cmd_browse, parse_browse_command};
pub use config::{cmd_config_set, cmd_config_show};
pub use ls::{cmd_ls, cmd_total};
pub use mutate::{cmd_delete, cmd_pay};

use std::sync::Arc;

use serde_json::Value;

use crate::cli::OutputOptions;
use crate::config::Config;
use crate::display::TerminalPrompt;
use crate::error::Result;
use crate::prompt::{Notice, UserPrompt};
use crate::remote::HttpProvider;

/// Output of a one-shot command, as JSON or as text
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => println!("{text}"),
            _ => print_json(&self.json)?,
        }
        Ok(())
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn http_provider(config: &Config) -> Result<Arc<HttpProvider>> {
    Ok(Arc::new(HttpProvider::from_config(config)?))
}

/// Terminal prompt for one-shot commands
///
/// Errors are returned to `main` and printed there, so error notices are
/// only logged here.
struct CommandPrompt {
    assume_yes: bool,
    quiet: bool,
}

impl UserPrompt for CommandPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.assume_yes || TerminalPrompt.confirm(message)
    }

    fn notify(&self, notice: &Notice) {
        if notice.is_error() {
            tracing::debug!("{}", notice.message);
        } else if !self.quiet {
            TerminalPrompt.notify(notice);
        }
    }
}
