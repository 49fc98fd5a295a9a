use super::{csv_files, FailedInsert, MatchStore, WriteOutcome};
use crate::error::Result;
use crate::model::{ImportedRecord, MasterStore, MatchedStore, NewMatchedStore};
use ahash::AHashSet;
use chrono::Utc;
use std::path::Path;
use tracing::{debug, warn};

/// In-process `MatchStore`, used for offline runs over CSV exports.
///
/// Enforces the same row constraints as the `matched_stores` DDL: one
/// match per import, known import and store ids, confidence in `[0, 1]`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    imported: Vec<ImportedRecord>,
    masters: Vec<MasterStore>,
    matches: Vec<MatchedStore>,
}

impl MemoryStore {
    pub fn new(imported: Vec<ImportedRecord>, masters: Vec<MasterStore>) -> Self {
        Self {
            imported,
            masters,
            matches: Vec::new(),
        }
    }

    pub fn from_csv_files(imported_path: &Path, masters_path: &Path) -> Result<Self> {
        let imported = csv_files::read_imported_records(imported_path)?;
        let masters = csv_files::read_master_stores(masters_path)?;
        debug!(
            "Loaded {} imported records and {} master stores from CSV",
            imported.len(),
            masters.len()
        );
        Ok(Self::new(imported, masters))
    }

    pub fn matches(&self) -> &[MatchedStore] {
        &self.matches
    }

    fn check_row(&self, row: &NewMatchedStore, seen: &AHashSet<i64>) -> Option<String> {
        if seen.contains(&row.import_id) {
            return Some(format!("duplicate match for import {}", row.import_id));
        }
        if !self.imported.iter().any(|r| r.id == row.import_id) {
            return Some(format!("unknown import id {}", row.import_id));
        }
        if !self.masters.iter().any(|m| m.id == row.store_id) {
            return Some(format!("unknown store id {}", row.store_id));
        }
        if !(0.0..=1.0).contains(&row.match_confidence) {
            return Some(format!(
                "match_confidence {} outside [0, 1]",
                row.match_confidence
            ));
        }
        None
    }
}

impl MatchStore for MemoryStore {
    fn prepare(&mut self) -> Result<()> {
        Ok(())
    }

    fn load_imported_records(&mut self) -> Result<Vec<ImportedRecord>> {
        let mut rows = self.imported.clone();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    fn load_master_stores(&mut self) -> Result<Vec<MasterStore>> {
        let mut rows = self.masters.clone();
        rows.sort_by_key(|m| m.id);
        Ok(rows)
    }

    fn replace_matches(&mut self, rows: &[NewMatchedStore]) -> Result<WriteOutcome> {
        let mut outcome = WriteOutcome::default();
        let mut accepted = Vec::with_capacity(rows.len());
        let mut seen: AHashSet<i64> = AHashSet::with_capacity(rows.len());
        let matched_at = Utc::now();

        for row in rows {
            if let Some(reason) = self.check_row(row, &seen) {
                warn!("Skipping match for import {}: {}", row.import_id, reason);
                outcome.failed.push(FailedInsert {
                    import_id: row.import_id,
                    reason,
                });
                continue;
            }
            seen.insert(row.import_id);
            let id = accepted.len() as i64 + 1;
            accepted.push(MatchedStore::from_new(id, row.clone(), matched_at));
            outcome.inserted += 1;
        }

        self.matches = accepted;
        Ok(outcome)
    }

    fn load_matches(&mut self) -> Result<Vec<MatchedStore>> {
        let mut rows = self.matches.clone();
        rows.sort_by_key(|m| m.import_id);
        Ok(rows)
    }

    fn clear_matches(&mut self) -> Result<()> {
        self.matches.clear();
        Ok(())
    }
}
