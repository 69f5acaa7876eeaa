//! Debounced value propagation
//!
//! [`Debounced`] owns one timer. `schedule` restarts it with a new value and
//! the value commits only when the timer runs out; `set_immediate` cancels
//! the timer and commits on the spot. Readers observe committed values
//! through [`Debounced::get`] or a `watch` receiver.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::config::SearchSettings;

pub struct Debounced<T> {
    sender: Arc<watch::Sender<T>>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debounced<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
            delay,
            pending: None,
        }
    }

    /// Debounce with the configured `search.debounce_ms`
    pub fn with_settings(initial: T, settings: &SearchSettings) -> Self {
        Self::new(initial, Duration::from_millis(settings.debounce_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Commit `value` after the delay unless another value arrives first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        let sender = Arc::clone(&self.sender);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sender.send_replace(value);
            trace!("Debounced value committed");
        }));
    }

    /// Cancel any pending value and commit `value` now
    pub fn set_immediate(&mut self, value: T) {
        self.cancel();
        self.sender.send_replace(value);
    }

    /// Drop the pending value, if any, keeping the committed one
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// Last committed value
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Receiver notified on every commit
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
