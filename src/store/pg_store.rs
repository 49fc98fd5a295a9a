use super::{MatchStore, WriteOutcome};
use crate::config::DatabaseConfig;
use crate::db::pg;
use crate::error::Result;
use crate::model::{ImportedRecord, MasterStore, MatchedStore, NewMatchedStore};
use diesel::pg::PgConnection;

/// `MatchStore` over a live Postgres (Supabase) database.
pub struct PgStore {
    connection: PgConnection,
    enable_trigram_extension: bool,
}

impl PgStore {
    pub fn connect(config: &DatabaseConfig) -> Result<Self> {
        Ok(Self {
            connection: pg::establish_connection(config.database_url()?)?,
            enable_trigram_extension: config.enable_trigram_extension,
        })
    }
}

impl MatchStore for PgStore {
    fn prepare(&mut self) -> Result<()> {
        if self.enable_trigram_extension {
            pg::enable_trigram_extension(&mut self.connection);
        }
        pg::ensure_matched_stores_table(&mut self.connection)
    }

    fn load_imported_records(&mut self) -> Result<Vec<ImportedRecord>> {
        pg::load_imported_records(&mut self.connection)
    }

    fn load_master_stores(&mut self) -> Result<Vec<MasterStore>> {
        pg::load_master_stores(&mut self.connection)
    }

    fn replace_matches(&mut self, rows: &[NewMatchedStore]) -> Result<WriteOutcome> {
        pg::replace_matched_stores(&mut self.connection, rows)
    }

    fn load_matches(&mut self) -> Result<Vec<MatchedStore>> {
        pg::load_matched_stores(&mut self.connection)
    }

    fn clear_matches(&mut self) -> Result<()> {
        pg::ensure_matched_stores_table(&mut self.connection)?;
        pg::truncate_matched_stores(&mut self.connection)
    }
}
