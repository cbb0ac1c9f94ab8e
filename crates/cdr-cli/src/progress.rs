use std::future::Future;
use std::time::Duration;

use cdr_wizard::progress_message;
use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// Delay between two waiting messages while an analysis is in flight.
const MESSAGE_ROTATION: Duration = Duration::from_secs(3);

pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Drive `task` to completion behind a spinner that cycles through the
/// waiting messages.
pub async fn with_waiting_messages<F: Future>(task: F) -> F::Output {
    let progress = Progress::spinner(progress_message(0));
    let mut ticker = tokio::time::interval(MESSAGE_ROTATION);
    // The first tick completes immediately.
    ticker.tick().await;

    tokio::pin!(task);
    let mut tick = 0_usize;
    let output = loop {
        tokio::select! {
            output = &mut task => break output,
            _ = ticker.tick() => {
                tick = tick.wrapping_add(1);
                progress.set_message(progress_message(tick));
            }
        }
    };
    progress.finish_clear();
    output
}
