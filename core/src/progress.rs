use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::knowledge::models::IndexingState;

/// Visual progress for a push run: one bar over the card set, plus a
/// segment bar per write batch while indexing is being watched.
///
/// Disabled mode (jsonl output, CI) swaps in hidden bars so callers
/// never branch.
pub struct SyncProgress {
    multi: MultiProgress,
    cards: ProgressBar,
    enabled: bool,
}

impl SyncProgress {
    pub fn new(total_cards: usize, enabled: bool) -> Self {
        if !enabled {
            return Self {
                multi: MultiProgress::new(),
                cards: ProgressBar::hidden(),
                enabled: false,
            };
        }

        let multi = MultiProgress::new();
        let cards = multi.add(ProgressBar::new(total_cards as u64));
        cards.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} cards {msg}")
                .unwrap()
                .progress_chars("█▓▒░  "),
        );
        cards.set_message("starting...");

        Self {
            multi,
            cards,
            enabled: true,
        }
    }

    /// Hidden monitor for callers that do not render progress.
    pub fn disabled() -> Self {
        Self::new(0, false)
    }

    pub fn start_card(&self, name: &str) {
        if self.enabled {
            self.cards.set_message(format!("⏳ {}", name));
        }
    }

    pub fn finish_card(&self, name: &str) {
        if !self.enabled {
            return;
        }
        self.cards.set_message(name.to_string());
        self.cards.inc(1);
    }

    /// Add a segment bar for one write batch.
    pub fn indexing_bar(&self) -> IndexingTicker {
        if !self.enabled {
            return IndexingTicker {
                bar: ProgressBar::hidden(),
                enabled: false,
            };
        }

        let bar = self.multi.add(ProgressBar::new(1));
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {bar:32.green/white} {pos}/{len} segments {msg}")
                .unwrap()
                .progress_chars("█▓▒░  "),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        IndexingTicker { bar, enabled: true }
    }

    pub fn finish(&self, success: bool) {
        if !self.enabled {
            return;
        }

        let msg = if success {
            "✅ all cards pushed"
        } else {
            "❌ push failed"
        };

        self.cards.finish_with_message(msg.to_string());
    }
}

/// Segment progress for a single indexing batch.
pub struct IndexingTicker {
    bar: ProgressBar,
    enabled: bool,
}

impl IndexingTicker {
    pub fn update(&self, completed: u64, total: u64, state: IndexingState) {
        if !self.enabled {
            return;
        }
        if total > 0 {
            self.bar.set_length(total);
        }
        self.bar.set_position(completed);
        self.bar.set_message(state.as_str().to_string());
    }

    pub fn finish(&self, state: IndexingState) {
        if !self.enabled {
            return;
        }
        let icon = if state == IndexingState::Completed {
            "✅"
        } else {
            "❌"
        };
        self.bar
            .finish_with_message(format!("{} indexing {}", icon, state));
    }
}
