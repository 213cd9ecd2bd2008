//! Transient error message shown on the dashboard.
//!
//! A message stays visible for a fixed window after the most recent
//! `show_error` call. A newer message replaces the old one and restarts the
//! window; windows never accumulate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// Default display window.
pub const DEFAULT_DISPLAY_WINDOW: Duration = Duration::from_millis(3000);

#[derive(Debug, Default)]
struct Shown {
    message: String,
    expires_at: Option<Instant>,
}

/// Shared handle to the current error message. Clones see the same state.
#[derive(Debug, Clone)]
pub struct ErrorNotice {
    inner: Arc<Mutex<Shown>>,
    window: Duration,
}

impl Default for ErrorNotice {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_WINDOW)
    }
}

impl ErrorNotice {
    pub fn new(window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shown::default())),
            window,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shown> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show `message`, replacing any current one and restarting the window.
    pub fn show_error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(message = %message, "Showing dashboard error");
        let mut shown = self.lock();
        shown.message = message;
        shown.expires_at = Some(Instant::now() + self.window);
    }

    /// The message currently shown, or an empty string when idle.
    pub fn current(&self) -> String {
        let mut shown = self.lock();
        match shown.expires_at {
            Some(deadline) if Instant::now() < deadline => shown.message.clone(),
            Some(_) => {
                *shown = Shown::default();
                String::new()
            }
            None => String::new(),
        }
    }
}
