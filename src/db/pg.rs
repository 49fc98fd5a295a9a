use super::schema::{excel_import_routes, matched_stores, stores};
use crate::config::DatabaseUrl;
use crate::error::{Error, Result};
use crate::model::{ImportedRecord, MasterStore, MatchedStore, NewMatchedStore};
use crate::store::{FailedInsert, WriteOutcome};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use tracing::{debug, warn};

pub const CREATE_TRIGRAM_EXTENSION_SQL: &str = "CREATE EXTENSION IF NOT EXISTS pg_trgm";

pub const CREATE_MATCHED_STORES_SQL: &str = "\
CREATE TABLE IF NOT EXISTS matched_stores (
    id BIGSERIAL PRIMARY KEY,
    import_id BIGINT NOT NULL UNIQUE REFERENCES excel_import_routes (id) ON DELETE CASCADE,
    store_id BIGINT NOT NULL REFERENCES stores (id) ON DELETE CASCADE,
    match_confidence DOUBLE PRECISION NOT NULL
        CHECK (match_confidence >= 0 AND match_confidence <= 1),
    route_name TEXT,
    imported_name TEXT NOT NULL,
    store_name TEXT NOT NULL,
    dispatch_code TEXT,
    store_code TEXT,
    store_company TEXT,
    address_line TEXT,
    eircode TEXT,
    total_quantity INTEGER,
    crates_needed INTEGER,
    matched_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

pub fn establish_connection(database_url: &DatabaseUrl) -> Result<PgConnection> {
    let connection = PgConnection::establish(database_url.expose())?;
    debug!("Connected to {:?}", database_url);
    Ok(connection)
}

/// Try to enable pg_trgm. The matcher scores in-process, so a failure here
/// is only logged.
pub fn enable_trigram_extension(connection: &mut PgConnection) -> bool {
    match diesel::sql_query(CREATE_TRIGRAM_EXTENSION_SQL).execute(connection) {
        Ok(_) => {
            debug!("pg_trgm extension available");
            true
        }
        Err(err) => {
            warn!("Could not enable pg_trgm extension: {}", err);
            false
        }
    }
}

pub fn ensure_matched_stores_table(connection: &mut PgConnection) -> Result<()> {
    diesel::sql_query(CREATE_MATCHED_STORES_SQL)
        .execute(connection)
        .map_err(|source| Error::Setup {
            step: "create matched_stores",
            source,
        })?;
    debug!("matched_stores table ready");
    Ok(())
}

pub fn truncate_matched_stores(connection: &mut PgConnection) -> Result<()> {
    debug!("Truncating table: matched_stores");
    diesel::sql_query("TRUNCATE TABLE matched_stores RESTART IDENTITY")
        .execute(connection)
        .map_err(|source| Error::Setup {
            step: "truncate matched_stores",
            source,
        })?;
    Ok(())
}

pub fn load_imported_records(connection: &mut PgConnection) -> Result<Vec<ImportedRecord>> {
    excel_import_routes::table
        .order(excel_import_routes::id.asc())
        .select(ImportedRecord::as_select())
        .load(connection)
        .map_err(|source| Error::Load {
            table: "excel_import_routes",
            source,
        })
}

pub fn load_master_stores(connection: &mut PgConnection) -> Result<Vec<MasterStore>> {
    stores::table
        .order(stores::id.asc())
        .select(MasterStore::as_select())
        .load(connection)
        .map_err(|source| Error::Load {
            table: "stores",
            source,
        })
}

pub fn load_matched_stores(connection: &mut PgConnection) -> Result<Vec<MatchedStore>> {
    matched_stores::table
        .order(matched_stores::import_id.asc())
        .select(MatchedStore::as_select())
        .load(connection)
        .map_err(|source| Error::Load {
            table: "matched_stores",
            source,
        })
}

/// Truncate `matched_stores` and insert `rows` in one transaction.
///
/// Every row goes through its own savepoint: a rejected row is rolled back
/// and recorded in the outcome while the surrounding transaction carries on.
pub fn replace_matched_stores(
    connection: &mut PgConnection,
    rows: &[NewMatchedStore],
) -> Result<WriteOutcome> {
    connection.transaction::<_, Error, _>(|connection| {
        truncate_matched_stores(connection)?;

        let mut outcome = WriteOutcome::default();
        for row in rows {
            let inserted = connection.transaction::<_, diesel::result::Error, _>(|connection| {
                diesel::insert_into(matched_stores::table)
                    .values(row)
                    .execute(connection)
            });

            match inserted {
                Ok(count) => outcome.inserted += count,
                Err(err) => {
                    warn!("Skipping match for import {}: {}", row.import_id, err);
                    outcome.failed.push(FailedInsert {
                        import_id: row.import_id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        debug!(
            "Inserted {} matched_stores rows ({} skipped)",
            outcome.inserted,
            outcome.failed.len()
        );
        Ok(outcome)
    })
}
