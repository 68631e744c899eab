//! Confirmed delete and payment actions on listed accounts.
//!
//! Each action asks for confirmation, calls the provider, notifies the user
//! and then reconciles the outcome into the listing through [`RowSet`].

use std::sync::Arc;

use jiff::civil::Date;

use crate::config::{Config, DeleteReconcile, Messages, PaymentReconcile, ReconcileConfig};
use crate::error::ContasError;
use crate::listing::RowSet;
use crate::prompt::{Notice, UserPrompt};
use crate::remote::AccountsProvider;
use crate::types::{AccountId, PaymentUpdate};

/// Source of today's date for payment records
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Local calendar date from the system time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        jiff::Zoned::now().date()
    }
}

/// Result of a delete or payment action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The user declined; nothing was sent
    Cancelled,
    /// The provider accepted the change
    Completed,
    /// The change was not made; remote failures were shown
    Failed(String),
}

impl MutationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

pub struct MutationController<P> {
    provider: Arc<P>,
    prompt: Arc<dyn UserPrompt>,
    rows: Arc<dyn RowSet>,
    clock: Arc<dyn Clock>,
    messages: Messages,
    reconcile: ReconcileConfig,
}

impl<P: AccountsProvider> MutationController<P> {
    pub fn new(
        provider: Arc<P>,
        prompt: Arc<dyn UserPrompt>,
        rows: Arc<dyn RowSet>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Self {
        Self {
            provider,
            prompt,
            rows,
            clock,
            messages: config.messages.clone(),
            reconcile: config.reconcile,
        }
    }

    /// Delete account `id` after confirmation
    pub async fn delete_entry(&self, id: AccountId) -> MutationOutcome {
        if !self.prompt.confirm(&self.messages.confirm_delete) {
            tracing::debug!(id, "delete cancelled");
            return MutationOutcome::Cancelled;
        }

        match self.provider.delete_account(id).await {
            Ok(()) => {
                tracing::info!(id, "account deleted");
                if self.rows.is_active() {
                    self.rows.remove_entry(id);
                    if self.reconcile.after_delete == DeleteReconcile::Refetch {
                        self.rows.request_refetch();
                    }
                    self.prompt.notify(&Notice::success(self.messages.deleted.as_str()));
                }
                MutationOutcome::Completed
            }
            Err(e) => self.fail(id, e),
        }
    }

    /// Record today as the payment date of account `id` after confirmation
    pub async fn mark_paid(&self, id: AccountId) -> MutationOutcome {
        if !self.prompt.confirm(&self.messages.confirm_payment) {
            tracing::debug!(id, "payment cancelled");
            return MutationOutcome::Cancelled;
        }

        let update = PaymentUpdate {
            payment_date: self.clock.today(),
        };
        match self.provider.update_payment_status(id, update).await {
            Ok(()) => {
                tracing::info!(id, date = %update.payment_date, "account marked as paid");
                if self.rows.is_active() {
                    match self.reconcile.after_payment {
                        PaymentReconcile::Patch => {
                            self.rows.set_payment_date(id, update.payment_date);
                        }
                        PaymentReconcile::Refetch => self.rows.request_refetch(),
                        PaymentReconcile::Leave => {}
                    }
                    self.prompt.notify(&Notice::success(self.messages.paid.as_str()));
                }
                MutationOutcome::Completed
            }
            Err(e) => self.fail(id, e),
        }
    }

    fn fail(&self, id: AccountId, error: ContasError) -> MutationOutcome {
        let message = error.to_string();
        if !error.is_provider_error() {
            tracing::error!(id, "mutation failed: {message}");
            return MutationOutcome::Failed(message);
        }
        tracing::warn!(id, "mutation failed: {message}");
        if self.rows.is_active() {
            self.prompt.notify(&Notice::error(message.as_str()));
        }
        MutationOutcome::Failed(message)
    }
}

impl<P> std::fmt::Debug for MutationController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationController")
            .field("reconcile", &self.reconcile)
            .finish_non_exhaustive()
    }
}
