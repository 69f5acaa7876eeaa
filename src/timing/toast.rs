//! Toast notifications with auto-dismiss timers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::ToastSettings;
use crate::constants::toast::{DEFAULT_DURATION_MS, MAX_VISIBLE};
use crate::domain::generate_id;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
}

#[derive(Default)]
struct Inner {
    toasts: Vec<Toast>,
    timers: HashMap<String, JoinHandle<()>>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Queue of toasts, each dismissed by its own timer.
///
/// Dropping the queue cancels every outstanding timer.
pub struct ToastQueue {
    inner: Arc<Mutex<Inner>>,
    duration: Duration,
    max_visible: usize,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DURATION_MS), MAX_VISIBLE)
    }
}

impl ToastQueue {
    pub fn new(duration: Duration, max_visible: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            duration,
            max_visible,
        }
    }

    /// Queue using the `[toast]` section of the configuration
    pub fn from_settings(settings: &ToastSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.duration_ms),
            settings.max_visible,
        )
    }

    /// Show a toast and start its dismiss timer; returns the toast id.
    ///
    /// Must be called from within a tokio runtime.
    pub fn add(&self, message: impl Into<String>, kind: ToastKind) -> String {
        let toast = Toast {
            id: generate_id(),
            message: message.into(),
            kind,
        };
        let id = toast.id.clone();

        // Held while the timer is spawned so it cannot fire before registration
        let mut inner = lock(&self.inner);
        inner.toasts.push(toast);

        let weak = Arc::downgrade(&self.inner);
        let timer_id = id.clone();
        let duration = self.duration;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(inner) = weak.upgrade() {
                let mut inner = lock(&inner);
                inner.toasts.retain(|t| t.id != timer_id);
                inner.timers.remove(&timer_id);
                debug!(id = %timer_id, "Toast expired");
            }
        });

        inner.timers.insert(id.clone(), timer);
        id
    }

    /// Surface a failure using its user-facing message
    pub fn error(&self, error: &AppError) -> String {
        self.add(error.user_message(), ToastKind::Error)
    }

    /// Dismiss a toast early, cancelling its timer
    pub fn remove(&self, id: &str) {
        let mut inner = lock(&self.inner);
        if let Some(timer) = inner.timers.remove(id) {
            timer.abort();
        }
        inner.toasts.retain(|t| t.id != id);
    }

    /// Every live toast, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        lock(&self.inner).toasts.clone()
    }

    /// The newest toasts up to the visible cap, oldest first
    pub fn visible(&self) -> Vec<Toast> {
        let inner = lock(&self.inner);
        let skip = inner.toasts.len().saturating_sub(self.max_visible);
        inner.toasts[skip..].to_vec()
    }

    pub fn pending_timers(&self) -> usize {
        lock(&self.inner).timers.len()
    }

    /// Remove every toast and cancel every timer
    pub fn clear(&self) {
        let mut inner = lock(&self.inner);
        for (_, timer) in inner.timers.drain() {
            timer.abort();
        }
        inner.toasts.clear();
    }
}

impl Drop for ToastQueue {
    fn drop(&mut self) {
        self.clear();
    }
}
