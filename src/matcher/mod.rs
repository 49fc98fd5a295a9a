pub mod scoring;
pub mod similarity;

use crate::config::MatcherConfig;
use crate::error::Result;
use crate::model::{ImportedRecord, MasterStore, NewMatchedStore};
use crate::progress::MatchReporter;
use crate::store::{FailedInsert, MatchStore};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRow {
    pub imported: ImportedRecord,
    pub store: MasterStore,
    pub confidence: f64,
}

/// An imported record whose best candidate stayed under the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct UnmatchedRow {
    pub imported: ImportedRecord,
    pub best_store: Option<MasterStore>,
    pub best_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSet {
    pub matched: Vec<MatchedRow>,
    pub unmatched: Vec<UnmatchedRow>,
}

impl MatchSet {
    pub fn to_new_rows(&self) -> Vec<NewMatchedStore> {
        self.matched
            .iter()
            .map(|m| NewMatchedStore::from_pair(&m.imported, &m.store, m.confidence))
            .collect()
    }
}

#[derive(Debug)]
pub struct MatchRun {
    pub matches: MatchSet,
    pub imported_count: usize,
    pub master_count: usize,
    pub inserted: usize,
    pub failed: Vec<FailedInsert>,
    pub load_duration: Duration,
    pub score_duration: Duration,
    pub write_duration: Duration,
}

pub struct StoreMatcher {
    config: MatcherConfig,
}

impl StoreMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Score every imported record against the whole directory.
    ///
    /// The directory is ordered by store id first, so a tie between equally
    /// scored entries always goes to the lowest id.
    pub fn match_records(
        &self,
        imported: &[ImportedRecord],
        masters: &[MasterStore],
        reporter: &dyn MatchReporter,
    ) -> MatchSet {
        let mut directory = masters.to_vec();
        directory.sort_by_key(|m| m.id);

        let total = imported.len();
        reporter.on_score_start(total);

        let mut set = MatchSet::default();
        for (i, record) in imported.iter().enumerate() {
            let best = scoring::best_candidate(&record.store_name, &directory, &self.config);

            match best {
                Some(candidate) if scoring::is_accepted(candidate.score, &self.config) => {
                    set.matched.push(MatchedRow {
                        imported: record.clone(),
                        store: directory[candidate.index].clone(),
                        confidence: candidate.score,
                    });
                }
                best => {
                    let best = best.filter(|c| c.score > 0.0);
                    set.unmatched.push(UnmatchedRow {
                        imported: record.clone(),
                        best_store: best.map(|c| directory[c.index].clone()),
                        best_score: best.map(|c| c.score).unwrap_or(0.0),
                    });
                }
            }

            reporter.on_score_progress(i + 1, total);
        }

        set
    }

    /// Run the full batch:
    /// 1. Prepare the store (result table, extension)
    /// 2. Load imported records and the store directory
    /// 3. Score every record, keep the best candidate above the threshold
    /// 4. Replace the previous result set
    ///
    /// Load and setup failures abort before anything is written. Rows the
    /// store rejects are returned in `MatchRun::failed`.
    pub fn run(&self, store: &mut dyn MatchStore, reporter: &dyn MatchReporter) -> Result<MatchRun> {
        info!("Preparing result table...");
        store.prepare()?;

        info!("Loading imported records and store directory...");
        reporter.on_load_start();
        let load_start = Instant::now();
        let imported = store.load_imported_records()?;
        let masters = store.load_master_stores()?;
        let load_duration = load_start.elapsed();
        reporter.on_load_complete(imported.len(), masters.len(), load_duration.as_secs_f64());
        debug!(
            "Loaded {} imported records, {} master stores in {:.2}s",
            imported.len(),
            masters.len(),
            load_duration.as_secs_f64()
        );

        info!(
            "Matching (threshold={:.2}, {:?} gram counting)...",
            self.config.threshold, self.config.gram_counting
        );
        let score_start = Instant::now();
        let matches = self.match_records(&imported, &masters, reporter);
        let score_duration = score_start.elapsed();
        reporter.on_score_complete(
            matches.matched.len(),
            matches.unmatched.len(),
            score_duration.as_secs_f64(),
        );

        info!("Writing {} matches...", matches.matched.len());
        let rows = matches.to_new_rows();
        reporter.on_write_start(rows.len());
        let write_start = Instant::now();
        let outcome = store.replace_matches(&rows)?;
        let write_duration = write_start.elapsed();
        reporter.on_write_complete(
            outcome.inserted,
            outcome.failed.len(),
            write_duration.as_secs_f64(),
        );

        Ok(MatchRun {
            imported_count: imported.len(),
            master_count: masters.len(),
            matches,
            inserted: outcome.inserted,
            failed: outcome.failed,
            load_duration,
            score_duration,
            write_duration,
        })
    }
}
