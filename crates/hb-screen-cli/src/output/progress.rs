//! Progress spinner adapter using indicatif.

use std::time::Duration;

use hb_screen_core::{ProgressEvent, ProgressSink};
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown on stderr while an image is analyzed.
pub struct ProgressSpinner {
    bar: Option<ProgressBar>,
}

impl ProgressSpinner {
    /// Creates a spinner; when `enabled` is false every event is ignored.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        Self { bar: Some(bar) }
    }
}

impl ProgressSink for ProgressSpinner {
    fn on_event(&self, event: ProgressEvent) {
        let Some(bar) = &self.bar else {
            return;
        };

        match event {
            ProgressEvent::Started { source } => {
                bar.enable_steady_tick(Duration::from_millis(100));
                bar.set_message(source);
            }
            ProgressEvent::Stage { stage } => bar.set_message(format!("{}...", stage.label())),
            ProgressEvent::Completed { result } => {
                bar.finish_with_message(format!("Done: {}", result.status));
            }
            ProgressEvent::Failed { .. } => bar.finish_and_clear(),
        }
    }
}
