//! Debounced task scheduling.
//!
//! A [`Debouncer`] coalesces rapid triggers: each call to
//! [`Debouncer::schedule`] cancels the task still waiting out its delay and
//! starts a fresh delay for the new one. Dropping the debouncer cancels
//! whatever is still waiting, so nothing fires after its owner is gone.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

#[derive(Default)]
struct Pending {
    /// Bumped on every schedule; a timer only fires if it still owns the slot
    generation: u64,
    /// Timer task that has not fired yet
    handle: Option<JoinHandle<()>>,
}

/// Coalesces triggers into one delayed execution of the latest task
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<Pending>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` once `delay` has passed without another call to `schedule`
    ///
    /// Must be called from within a tokio runtime. A task that has already
    /// started running is not cancelled by later calls.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock();
        if let Some(handle) = pending.handle.take() {
            handle.abort();
        }
        pending.generation = pending.generation.wrapping_add(1);

        let generation = pending.generation;
        let slot = Arc::clone(&self.pending);
        let delay = self.delay;

        pending.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut pending = slot.lock();
                if pending.generation != generation {
                    return;
                }
                pending.handle = None;
            }
            task.await;
        }));
    }

    /// Cancel the task waiting out its delay, if any
    pub fn cancel(&self) -> bool {
        let mut pending = self.pending.lock();
        pending.generation = pending.generation.wrapping_add(1);
        match pending.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Whether a task is still waiting out its delay
    pub fn is_pending(&self) -> bool {
        self.pending.lock().handle.is_some()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}
