//! Progress reporting utilities using indicatif.
//!
//! The [`Progress`] struct implements [`ProgressCallback`] and draws a bar
//! for the caching phase in the terminal.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for the caching phase.
///
/// Implement this trait to receive progress updates while a batch driver
/// works through the uncached assets.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "caching")
    /// * `total` - Total number of items to process
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called before each item is processed.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item number (1-based)
    /// * `message` - Progress message for the item
    fn on_progress(&self, current: usize, message: &str);

    /// Called when a phase completes, successfully or not.
    fn on_phase_end(&self, phase: &str);
}

/// Terminal progress bar for the caching phase.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bar will be displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use asset_cache::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(bar) = guard.as_ref() {
                f(bar);
            }
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet || total == 0 {
            return;
        }
        let bar = ProgressBar::new(total as u64);
        bar.set_style(Self::style());
        bar.set_message(phase.to_string());
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_progress(&self, current: usize, message: &str) {
        // The bar counts finished items; `current` is the one starting now.
        self.with_bar(|bar| {
            bar.set_position(current.saturating_sub(1) as u64);
            bar.set_message(message.to_string());
        });
    }

    fn on_phase_end(&self, phase: &str) {
        let bar = self.bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some(bar) = bar {
            bar.finish_with_message(format!("{} complete", phase));
        }
    }
}
