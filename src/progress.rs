//! Progress display for version lookups
//!
//! Provides transient visual feedback while the index is queried using
//! indicatif. The orchestrator only talks to the `ProgressListener` trait.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Callbacks invoked around each package lookup
pub trait ProgressListener {
    /// A lookup for `package` is about to start
    fn lookup_started(&mut self, package: &str);

    /// The lookup finished; `outdated` tells whether an update was found
    fn lookup_finished(&mut self, package: &str, outdated: bool);
}

/// Listener that ignores everything
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn lookup_started(&mut self, _package: &str) {}

    fn lookup_finished(&mut self, _package: &str, _outdated: bool) {}
}

/// Spinner-based progress reporter
pub struct Progress {
    /// Whether progress display is enabled (disabled in quiet/json mode)
    enabled: bool,
    /// Current spinner
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Show a spinner with a message for an indeterminate operation
    pub fn spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Finish and clear the current spinner
    pub fn finish_and_clear(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        self.bar = None;
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ProgressListener for Progress {
    fn lookup_started(&mut self, package: &str) {
        self.spinner(package);
    }

    fn lookup_finished(&mut self, _package: &str, _outdated: bool) {
        self.finish_and_clear();
    }
}
