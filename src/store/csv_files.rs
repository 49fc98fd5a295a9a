//! CSV exports of the two input tables, one row per record with the
//! column names of the database tables as headers.

use crate::error::Result;
use crate::model::{ImportedRecord, MasterStore};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

pub fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn read_imported_records(path: &Path) -> Result<Vec<ImportedRecord>> {
    read_rows(std::fs::File::open(path)?)
}

pub fn read_master_stores(path: &Path) -> Result<Vec<MasterStore>> {
    read_rows(std::fs::File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_imported_records_with_blank_optionals() {
        let data = "\
id,store_name,route_name,total_quantity,crates_needed
1,1001C Circle K - Gallowshill (30893),Route 4,120,6
2,Centra Naas,,,
";
        let rows: Vec<ImportedRecord> = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].route_name.as_deref(), Some("Route 4"));
        assert_eq!(rows[0].crates_needed, Some(6));
        assert_eq!(rows[1].route_name, None);
        assert_eq!(rows[1].total_quantity, None);
    }

    #[test]
    fn test_read_master_stores_with_missing_columns() {
        let data = "\
id,store_name,dispatch_code
10,Circle K Gallowshill,1001C
11,Centra Naas,
";
        let rows: Vec<MasterStore> = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].dispatch_code.as_deref(), Some("1001C"));
        assert_eq!(rows[1].dispatch_code, None);
        assert_eq!(rows[1].eircode, None);
    }

    #[test]
    fn test_read_rows_rejects_bad_id() {
        let data = "id,store_name\nabc,Centra\n";
        assert!(read_rows::<ImportedRecord, _>(data.as_bytes()).is_err());
    }
}
