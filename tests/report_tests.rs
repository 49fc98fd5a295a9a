use std::fs;

use store_matcher::config::MatcherConfig;
use store_matcher::model::{ImportedRecord, MasterStore};
use store_matcher::report;
use store_matcher::store::MemoryStore;
use store_matcher::{MatchSet, SilentReporter, StoreMatcher};

fn imported(id: i64, name: &str, route: Option<&str>) -> ImportedRecord {
    ImportedRecord {
        id,
        store_name: name.to_string(),
        route_name: route.map(str::to_string),
        total_quantity: None,
        crates_needed: None,
    }
}

fn sample_set() -> MatchSet {
    let masters = vec![
        MasterStore {
            dispatch_code: Some("1001C".to_string()),
            ..MasterStore::named(10, "Circle K Gallowshill")
        },
        MasterStore::named(12, "Centra Ballymun"),
    ];
    let records = vec![
        imported(3, "Quux Warehouse", None),
        imported(1, "1001C Circle K - Gallowshill (30893)", Some("Route 4")),
        imported(2, "Centra Ballymun", Some("Route 9")),
    ];
    StoreMatcher::new(MatcherConfig::default()).match_records(&records, &masters, &SilentReporter)
}

#[test]
fn test_export_rows_cover_every_import_in_id_order() {
    let rows = report::export_rows(&sample_set());

    let ids: Vec<i64> = rows.iter().map(|r| r.import_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(rows[0].status, "matched");
    assert_eq!(rows[0].store_id, Some(10));
    assert_eq!(rows[0].dispatch_code.as_deref(), Some("1001C"));
    assert_eq!(rows[1].confidence, Some(0.8));
    assert_eq!(rows[2].status, "unmatched");
    assert_eq!(rows[2].store_id, None);
    assert_eq!(rows[2].confidence, None);
}

#[test]
fn test_write_csv_header_and_rows() {
    let mut buffer = Vec::new();
    let written = report::write_csv(&sample_set(), &mut buffer).unwrap();
    assert_eq!(written, 3);

    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "import_id,imported_name,route_name,status,store_id,store_name,dispatch_code,confidence"
    );
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[2], "2,Centra Ballymun,Route 9,matched,12,Centra Ballymun,,0.8");
    assert_eq!(lines[3], "3,Quux Warehouse,,unmatched,,,,");
}

#[test]
fn test_write_csv_file_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("matches.csv");

    let written = report::write_csv_file(&sample_set(), &path).unwrap();

    assert_eq!(written, 3);
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("import_id,"));
}

#[test]
fn test_tables_list_names() {
    let set = sample_set();

    let matched = report::matched_table(&set, 0);
    assert!(matched.contains("Circle K Gallowshill"));
    assert!(matched.contains("80.0%"));
    assert!(!matched.contains("Quux Warehouse"));

    let unmatched = report::unmatched_table(&set, 0);
    assert!(unmatched.contains("Quux Warehouse"));
}

#[test]
fn test_tables_truncate_to_max_rows() {
    let set = sample_set();
    let table = report::matched_table(&set, 1);
    assert!(table.contains("... 1 more rows"));
    assert!(!table.contains("Centra Ballymun"));
}

#[test]
fn test_match_files_round_trip_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let imports = dir.path().join("excel_import_routes.csv");
    let stores = dir.path().join("stores.csv");
    fs::write(
        &imports,
        "id,store_name,route_name,total_quantity,crates_needed\n\
         1,1001C Circle K - Gallowshill (30893),Route 4,120,6\n\
         2,Quux Warehouse,Route 4,10,1\n",
    )
    .unwrap();
    fs::write(
        &stores,
        "id,store_name,dispatch_code,store_code\n\
         10,Circle K Gallowshill,1001C,\n\
         12,Centra Ballymun,,\n",
    )
    .unwrap();

    let mut store = MemoryStore::from_csv_files(&imports, &stores).unwrap();
    let run = StoreMatcher::new(MatcherConfig::default())
        .run(&mut store, &SilentReporter)
        .unwrap();

    assert_eq!(run.imported_count, 2);
    assert_eq!(run.master_count, 2);
    assert_eq!(run.inserted, 1);
    assert_eq!(store.matches()[0].store_id, 10);
    assert_eq!(store.matches()[0].total_quantity, Some(120));
}
