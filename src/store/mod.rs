pub mod csv_files;
pub mod memory;
pub mod pg_store;

use crate::error::Result;
use crate::model::{ImportedRecord, MasterStore, MatchedStore, NewMatchedStore};

pub use memory::MemoryStore;
pub use pg_store::PgStore;

/// A result row the store refused. The rest of the run is unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedInsert {
    pub import_id: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteOutcome {
    pub inserted: usize,
    pub failed: Vec<FailedInsert>,
}

/// Backing store the matcher reads from and writes to.
///
/// Loads return rows ordered by id. `replace_matches` discards the previous
/// result set and writes the new one; rows the store rejects are reported
/// in the outcome instead of failing the call.
pub trait MatchStore {
    /// Make sure the result table exists.
    fn prepare(&mut self) -> Result<()>;
    fn load_imported_records(&mut self) -> Result<Vec<ImportedRecord>>;
    fn load_master_stores(&mut self) -> Result<Vec<MasterStore>>;
    fn replace_matches(&mut self, rows: &[NewMatchedStore]) -> Result<WriteOutcome>;
    fn load_matches(&mut self) -> Result<Vec<MatchedStore>>;
    fn clear_matches(&mut self) -> Result<()>;
}
