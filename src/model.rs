use crate::db::schema;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One store line item from an uploaded order file.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::excel_import_routes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ImportedRecord {
    pub id: i64,
    pub store_name: String,
    #[serde(default)]
    pub route_name: Option<String>,
    #[serde(default)]
    pub total_quantity: Option<i32>,
    #[serde(default)]
    pub crates_needed: Option<i32>,
}

/// Canonical entry of the store directory.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::stores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MasterStore {
    pub id: i64,
    pub store_name: String,
    #[serde(default)]
    pub dispatch_code: Option<String>,
    #[serde(default)]
    pub store_code: Option<String>,
    #[serde(default)]
    pub store_company: Option<String>,
    #[serde(default)]
    pub address_line: Option<String>,
    #[serde(default)]
    pub geolocation: Option<String>,
    #[serde(default)]
    pub eircode: Option<String>,
    #[serde(default)]
    pub alarm_code: Option<String>,
    #[serde(default)]
    pub key_code: Option<String>,
    #[serde(default)]
    pub delivery_window_start: Option<String>,
    #[serde(default)]
    pub delivery_window_end: Option<String>,
}

impl MasterStore {
    /// Bare directory entry, mostly useful for building fixtures.
    pub fn named(id: i64, store_name: &str) -> MasterStore {
        MasterStore {
            id,
            store_name: store_name.to_string(),
            dispatch_code: None,
            store_code: None,
            store_company: None,
            address_line: None,
            geolocation: None,
            eircode: None,
            alarm_code: None,
            key_code: None,
            delivery_window_start: None,
            delivery_window_end: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = schema::matched_stores)]
pub struct NewMatchedStore {
    pub import_id: i64,
    pub store_id: i64,
    pub match_confidence: f64,
    pub route_name: Option<String>,
    pub imported_name: String,
    pub store_name: String,
    pub dispatch_code: Option<String>,
    pub store_code: Option<String>,
    pub store_company: Option<String>,
    pub address_line: Option<String>,
    pub eircode: Option<String>,
    pub total_quantity: Option<i32>,
    pub crates_needed: Option<i32>,
}

impl NewMatchedStore {
    pub fn from_pair(
        imported: &ImportedRecord,
        master: &MasterStore,
        match_confidence: f64,
    ) -> NewMatchedStore {
        NewMatchedStore {
            import_id: imported.id,
            store_id: master.id,
            match_confidence,
            route_name: imported.route_name.clone(),
            imported_name: imported.store_name.clone(),
            store_name: master.store_name.clone(),
            dispatch_code: master.dispatch_code.clone(),
            store_code: master.store_code.clone(),
            store_company: master.store_company.clone(),
            address_line: master.address_line.clone(),
            eircode: master.eircode.clone(),
            total_quantity: imported.total_quantity,
            crates_needed: imported.crates_needed,
        }
    }
}

/// A persisted match as read back from `matched_stores`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schema::matched_stores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MatchedStore {
    pub id: i64,
    pub import_id: i64,
    pub store_id: i64,
    pub match_confidence: f64,
    pub route_name: Option<String>,
    pub imported_name: String,
    pub store_name: String,
    pub dispatch_code: Option<String>,
    pub store_code: Option<String>,
    pub store_company: Option<String>,
    pub address_line: Option<String>,
    pub eircode: Option<String>,
    pub total_quantity: Option<i32>,
    pub crates_needed: Option<i32>,
    pub matched_at: DateTime<Utc>,
}

impl MatchedStore {
    pub fn from_new(id: i64, row: NewMatchedStore, matched_at: DateTime<Utc>) -> MatchedStore {
        MatchedStore {
            id,
            import_id: row.import_id,
            store_id: row.store_id,
            match_confidence: row.match_confidence,
            route_name: row.route_name,
            imported_name: row.imported_name,
            store_name: row.store_name,
            dispatch_code: row.dispatch_code,
            store_code: row.store_code,
            store_company: row.store_company,
            address_line: row.address_line,
            eircode: row.eircode,
            total_quantity: row.total_quantity,
            crates_needed: row.crates_needed,
            matched_at,
        }
    }
}
