use astro_core::enums::ItemStatus;
use astro_core::observer::IngestObserver;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::ui;

fn terminal_columns() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
}

fn bar_template() -> &'static str {
    match terminal_columns() {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {pos}/{len} {msg}",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

/// Batch progress bar on stderr, driven by ingest callbacks.
///
/// Hidden when progress is disabled; the callbacks still count so the final
/// message is right.
pub struct BatchProgress {
    bar: ProgressBar,
    message: String,
}

impl BatchProgress {
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = if ui::prefs().progress {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::with_template(bar_template())
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        } else {
            ProgressBar::hidden()
        };
        bar.set_message(message.to_string());
        Self {
            bar,
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl IngestObserver for BatchProgress {
    fn started(&self, total: usize) {
        self.bar.set_length(u64::try_from(total).unwrap_or(u64::MAX));
        self.bar.set_position(0);
    }

    fn item(&self, _index: usize, label: &str, status: ItemStatus) {
        if status != ItemStatus::Added {
            self.bar.set_message(format!("{}: {label} {status}", self.message));
        }
        self.bar.inc(1);
    }

    fn finished(&self) {
        let done = format!(
            "{} done ({}/{})",
            self.message,
            self.bar.position(),
            self.bar.length().unwrap_or(0)
        );
        self.bar.finish_with_message(done);
    }
}
