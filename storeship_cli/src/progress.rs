//! Spinner-based status rendering
//!
//! Implements the core `StatusReporter` trait with an indicatif spinner.
//! When stderr is not a terminal the reporter stays silent, matching how the
//! rest of the CLI degrades without a TTY.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use storeship_client_core::progress::StatusReporter;

use crate::terminal;

/// Spinner renderer for remote operations
pub struct SpinnerReporter {
    active: Mutex<Option<(ProgressBar, String)>>,
    enabled: bool,
}

impl Default for SpinnerReporter {
    fn default() -> Self {
        Self::new(terminal::is_interactive())
    }
}

impl SpinnerReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            active: Mutex::new(None),
            enabled,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid")
    }
}

impl StatusReporter for SpinnerReporter {
    fn task_started(&self, message: &str) {
        if !self.enabled {
            return;
        }
        let bar = ProgressBar::new_spinner()
            .with_style(Self::style())
            .with_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        let mut guard = self.active.lock().unwrap();
        if let Some((previous, _)) = guard.replace((bar, message.to_string())) {
            previous.finish_and_clear();
        }
    }

    fn task_succeeded(&self) {
        if let Some((bar, message)) = self.active.lock().unwrap().take() {
            bar.finish_with_message(format!("✓ {message}"));
        }
    }

    fn task_failed(&self, message: Option<&str>) {
        if let Some((bar, started_with)) = self.active.lock().unwrap().take() {
            let message = message.map(str::to_string).unwrap_or(started_with);
            bar.abandon_with_message(format!("✗ {message}"));
        }
    }
}
