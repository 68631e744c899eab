//! Configuration commands.
//!
//! - `config set`: Set a configuration value
//! - `config show`: Display current configuration

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let base_url = config.api_base_url();
    let base_url_overridden = base_url != config.base_url;

    let json_output = json!({
        "base_url": base_url,
        "page_size": config.page_size,
        "search_debounce_ms": config.search_debounce_ms,
        "remote_timeout": config.remote_timeout,
        "reconcile": {
            "after_delete": config.reconcile.after_delete.to_string(),
            "after_payment": config.reconcile.after_payment.to_string(),
        },
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    let source = if base_url_overridden {
        format!(" {}", "(from CONTAS_BASE_URL)".dimmed())
    } else {
        String::new()
    };
    text_output.push_str(&format!("{}: {base_url}{source}\n", "base_url".cyan()));
    text_output.push_str(&format!("{}: {}\n", "page_size".cyan(), config.page_size));
    text_output.push_str(&format!(
        "{}: {}\n",
        "search_debounce_ms".cyan(),
        config.search_debounce_ms
    ));
    text_output.push_str(&format!(
        "{}: {}\n",
        "remote_timeout".cyan(),
        config.remote_timeout
    ));

    text_output.push('\n');
    text_output.push_str(&format!("{}:\n", "reconcile".cyan()));
    text_output.push_str(&format!("  after_delete: {}\n", config.reconcile.after_delete));
    text_output.push_str(&format!("  after_payment: {}\n", config.reconcile.after_payment));

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    tracing::info!(key, value, "configuration updated");

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": value,
        "success": true,
    }))
    .with_text(format!("Set {} to {value}", key.cyan()))
    .print(output)
}
