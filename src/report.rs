use crate::error::Result;
use crate::matcher::scoring::PairScore;
use crate::matcher::MatchSet;
use crate::model::MatchedStore;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct MatchedLine {
    #[tabled(rename = "import")]
    pub import_id: i64,
    #[tabled(rename = "imported name")]
    pub imported_name: String,
    #[tabled(rename = "route")]
    pub route_name: String,
    #[tabled(rename = "store")]
    pub store_id: i64,
    #[tabled(rename = "store name")]
    pub store_name: String,
    #[tabled(rename = "dispatch")]
    pub dispatch_code: String,
    #[tabled(rename = "confidence")]
    pub confidence: String,
}

#[derive(Tabled)]
pub struct UnmatchedLine {
    #[tabled(rename = "import")]
    pub import_id: i64,
    #[tabled(rename = "imported name")]
    pub imported_name: String,
    #[tabled(rename = "route")]
    pub route_name: String,
    #[tabled(rename = "best candidate")]
    pub best_candidate: String,
    #[tabled(rename = "best score")]
    pub best_score: String,
}

#[derive(Tabled)]
struct StoredLine {
    #[tabled(rename = "import")]
    import_id: i64,
    #[tabled(rename = "imported name")]
    imported_name: String,
    #[tabled(rename = "store")]
    store_id: i64,
    #[tabled(rename = "store name")]
    store_name: String,
    #[tabled(rename = "confidence")]
    confidence: String,
    #[tabled(rename = "matched at")]
    matched_at: String,
}

#[derive(Tabled)]
struct VariantLine {
    #[tabled(rename = "variant")]
    label: &'static str,
    #[tabled(rename = "compared with")]
    candidate: String,
    #[tabled(rename = "score")]
    score: String,
}

/// One CSV line per imported record, matched or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub import_id: i64,
    pub imported_name: String,
    pub route_name: Option<String>,
    pub status: &'static str,
    pub store_id: Option<i64>,
    pub store_name: Option<String>,
    pub dispatch_code: Option<String>,
    pub confidence: Option<f64>,
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

fn render<T: Tabled>(lines: Vec<T>, max_rows: usize) -> String {
    let total = lines.len();
    let shown: Vec<T> = if max_rows > 0 {
        lines.into_iter().take(max_rows).collect()
    } else {
        lines
    };
    let hidden = total - shown.len();

    let mut table = Table::new(shown).with(Style::psql()).to_string();
    if hidden > 0 {
        table.push_str(&format!("\n... {} more rows", hidden));
    }
    table
}

pub fn matched_lines(set: &MatchSet) -> Vec<MatchedLine> {
    set.matched
        .iter()
        .map(|m| MatchedLine {
            import_id: m.imported.id,
            imported_name: m.imported.store_name.clone(),
            route_name: or_dash(&m.imported.route_name),
            store_id: m.store.id,
            store_name: m.store.store_name.clone(),
            dispatch_code: or_dash(&m.store.dispatch_code),
            confidence: percent(m.confidence),
        })
        .collect()
}

pub fn unmatched_lines(set: &MatchSet) -> Vec<UnmatchedLine> {
    set.unmatched
        .iter()
        .map(|u| UnmatchedLine {
            import_id: u.imported.id,
            imported_name: u.imported.store_name.clone(),
            route_name: or_dash(&u.imported.route_name),
            best_candidate: u
                .best_store
                .as_ref()
                .map(|s| s.store_name.clone())
                .unwrap_or_else(|| "-".to_string()),
            best_score: if u.best_store.is_some() {
                percent(u.best_score)
            } else {
                "-".to_string()
            },
        })
        .collect()
}

pub fn matched_table(set: &MatchSet, max_rows: usize) -> String {
    render(matched_lines(set), max_rows)
}

pub fn unmatched_table(set: &MatchSet, max_rows: usize) -> String {
    render(unmatched_lines(set), max_rows)
}

pub fn print_match_set(set: &MatchSet, max_rows: usize) {
    println!("\nMatched stores ({}):", set.matched.len());
    println!("{}", matched_table(set, max_rows));
    println!("\nUnmatched stores ({}):", set.unmatched.len());
    println!("{}", unmatched_table(set, max_rows));
}

pub fn stored_matches_table(rows: &[MatchedStore], max_rows: usize) -> String {
    let lines: Vec<StoredLine> = rows
        .iter()
        .map(|r| StoredLine {
            import_id: r.import_id,
            imported_name: r.imported_name.clone(),
            store_id: r.store_id,
            store_name: r.store_name.clone(),
            confidence: percent(r.match_confidence),
            matched_at: r.matched_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();
    render(lines, max_rows)
}

pub fn pair_score_table(score: &PairScore) -> String {
    let lines: Vec<VariantLine> = score
        .variants
        .iter()
        .map(|v| VariantLine {
            label: v.label,
            candidate: v.candidate.clone(),
            score: format!("{:.4}", v.score),
        })
        .collect();
    render(lines, 0)
}

pub fn export_rows(set: &MatchSet) -> Vec<ExportRow> {
    let mut rows: Vec<ExportRow> = set
        .matched
        .iter()
        .map(|m| ExportRow {
            import_id: m.imported.id,
            imported_name: m.imported.store_name.clone(),
            route_name: m.imported.route_name.clone(),
            status: "matched",
            store_id: Some(m.store.id),
            store_name: Some(m.store.store_name.clone()),
            dispatch_code: m.store.dispatch_code.clone(),
            confidence: Some(m.confidence),
        })
        .chain(set.unmatched.iter().map(|u| ExportRow {
            import_id: u.imported.id,
            imported_name: u.imported.store_name.clone(),
            route_name: u.imported.route_name.clone(),
            status: "unmatched",
            store_id: None,
            store_name: None,
            dispatch_code: None,
            confidence: None,
        }))
        .collect();
    rows.sort_by_key(|r| r.import_id);
    rows
}

pub fn write_csv<W: Write>(set: &MatchSet, writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    let rows = export_rows(set);
    for row in &rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

pub fn write_csv_file(set: &MatchSet, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_csv(set, std::fs::File::create(path)?)
}
