use std::sync::Arc;

use jiff::civil::Date;
use serde_json::json;

use super::{CommandOutput, CommandPrompt, http_provider};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::{ContasError, Result};
use crate::listing::RowSet;
use crate::mutation::{MutationController, MutationOutcome, SystemClock};
use crate::prompt::UserPrompt;
use crate::remote::HttpProvider;
use crate::types::AccountId;

/// Row set for one-shot commands, where nothing is listed
///
/// It stays active so outcome notices are still shown.
struct Detached;

impl RowSet for Detached {
    fn is_active(&self) -> bool {
        true
    }

    fn remove_entry(&self, _id: AccountId) -> bool {
        false
    }

    fn set_payment_date(&self, _id: AccountId, _date: Date) -> bool {
        false
    }

    fn request_refetch(&self) {}
}

fn mutation_controller(
    config: &Config,
    assume_yes: bool,
    output: OutputOptions,
) -> Result<MutationController<HttpProvider>> {
    let provider = http_provider(config)?;
    let prompt: Arc<dyn UserPrompt> = Arc::new(CommandPrompt {
        assume_yes,
        quiet: output.json,
    });
    Ok(MutationController::new(
        provider,
        prompt,
        Arc::new(Detached),
        Arc::new(SystemClock),
        config,
    ))
}

fn finish(action: &str, id: AccountId, outcome: MutationOutcome, output: OutputOptions) -> Result<()> {
    match outcome {
        // The success notice has already been shown in text mode
        MutationOutcome::Completed if !output.json => Ok(()),
        MutationOutcome::Completed => CommandOutput::new(json!({
            "action": action,
            "id": id,
            "success": true,
        }))
        .print(output),
        MutationOutcome::Cancelled => CommandOutput::new(json!({
            "action": action,
            "id": id,
            "success": false,
            "cancelled": true,
        }))
        .with_text("Cancelado")
        .print(output),
        MutationOutcome::Failed(message) => Err(ContasError::Provider(message)),
    }
}

/// Delete an account after confirmation
pub async fn cmd_delete(id: AccountId, assume_yes: bool, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let mutations = mutation_controller(&config, assume_yes, output)?;
    let outcome = mutations.delete_entry(id).await;
    finish("delete", id, outcome, output)
}

/// Mark an account as paid today after confirmation
pub async fn cmd_pay(id: AccountId, assume_yes: bool, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let mutations = mutation_controller(&config, assume_yes, output)?;
    let outcome = mutations.mark_paid(id).await;
    finish("pay", id, outcome, output)
}
