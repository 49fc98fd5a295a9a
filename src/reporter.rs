use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;
use store_matcher::MatchReporter;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI progress reporter using indicatif.
///
/// - Load phase: spinner
/// - Score phase: progress bar over imported records
/// - Write phase: spinner
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    fn spinner(&self, message: &'static str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars(TICK_CHARS),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Some(old) = self.bar.borrow_mut().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl MatchReporter for CliReporter {
    fn on_load_start(&self) {
        self.spinner("Loading imported records and store directory...");
    }

    fn on_load_complete(&self, imported: usize, masters: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Loaded {} imported records, {} stores in {:.2}s",
            imported, masters, duration_secs
        );
    }

    fn on_score_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Matching [{bar:30.cyan/dim}] {pos}/{len} records ({eta} remaining)",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸─")
            .tick_chars(TICK_CHARS),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_score_progress(&self, scored: usize, _total: usize) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_position(scored as u64);
        }
    }

    fn on_score_complete(&self, matched: usize, unmatched: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Matching complete: {} matched, {} unmatched in {:.2}s",
            matched, unmatched, duration_secs
        );
    }

    fn on_write_start(&self, _rows: usize) {
        self.spinner("Replacing matched_stores...");
    }

    fn on_write_complete(&self, inserted: usize, failed: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Write complete: {} rows ({} skipped) in {:.2}s",
            inserted, failed, duration_secs
        );
    }
}
