//! Progress bar utilities using indicatif
//!
//! Wraps indicatif's `ProgressBar` so the summarizer can report how far
//! through a log it is without knowing how the bar is drawn.

use indicatif::{ProgressBar as IndicatifBar, ProgressDrawTarget, ProgressStyle};

/// Progress bar wrapper for displaying processing status
pub struct ProgressBar {
    bar: IndicatifBar,
}

impl ProgressBar {
    /// Create a byte-based progress bar for a file of known size
    pub fn new(total_bytes: u64, label: &str) -> Self {
        let bar = IndicatifBar::new(total_bytes);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{msg} [{bar:40.cyan/blue}] {percent:>3}% ({bytes}/{total_bytes}) ({bytes_per_sec}) {eta}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█░"),
        );
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// Create a spinner for input of unknown size (compressed files)
    pub fn new_spinner(label: &str) -> Self {
        let bar = IndicatifBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg} {spinner} {bytes} read")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// A bar that never draws, for tests and non-interactive callers
    pub fn hidden() -> Self {
        let bar = IndicatifBar::with_draw_target(None, ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Update progress
    pub fn update(&self, current: u64) {
        self.bar.set_position(current);
    }

    /// Current position
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish and leave a summary line
    pub fn finish_with_message(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_tracks_position() {
        let bar = ProgressBar::hidden();
        bar.update(42);
        assert_eq!(bar.position(), 42);
        bar.finish_with_message("done");
    }

    #[test]
    fn test_spinner_tracks_position() {
        let bar = ProgressBar::new_spinner("Reading");
        bar.update(3);
        assert_eq!(bar.position(), 3);
    }
}
