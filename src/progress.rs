/// Trait for reporting matcher progress.
///
/// The CLI implements it with indicatif bars; library callers and tests use
/// `SilentReporter`. All methods have default no-op implementations.
pub trait MatchReporter {
    fn on_load_start(&self) {}
    fn on_load_complete(&self, _imported: usize, _masters: usize, _duration_secs: f64) {}
    fn on_score_start(&self, _total: usize) {}
    fn on_score_progress(&self, _scored: usize, _total: usize) {}
    fn on_score_complete(&self, _matched: usize, _unmatched: usize, _duration_secs: f64) {}
    fn on_write_start(&self, _rows: usize) {}
    fn on_write_complete(&self, _inserted: usize, _failed: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl MatchReporter for SilentReporter {}
