mod cli;
mod logging;
mod reporter;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use colored::*;
use dotenv::dotenv;
use reporter::CliReporter;
use store_matcher::config::{self, AppConfig};
use store_matcher::matcher::scoring;
use store_matcher::model::MasterStore;
use store_matcher::{report, MatchRun, MatchStore, MemoryStore, PgStore, StoreMatcher};
use tracing::{error, info, warn};

fn main() {
    dotenv().ok();

    let args = Cli::parse();
    let guard = logging::init_logger(args.verbose);

    let config = match config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            drop(guard);
            process::exit(1);
        }
    };

    let result = match args.command {
        Some(Commands::Run { threshold, csv }) => run_database(config, threshold, csv),
        Some(Commands::MatchFiles {
            imports,
            stores,
            threshold,
            csv,
        }) => run_files(config, &imports, &stores, threshold, csv),
        Some(Commands::Score {
            imported_name,
            store_name,
            dispatch_code,
            store_code,
            company,
        }) => {
            let master = MasterStore {
                dispatch_code,
                store_code,
                store_company: company,
                ..MasterStore::named(0, &store_name)
            };
            print_pair_score(&config, &imported_name, &master);
            Ok(())
        }
        Some(Commands::ShowMatches) => show_matches(&config),
        Some(Commands::TruncateMatches) => truncate_matches(&config),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:#?}", config);
            Ok(())
        }
        None => Cli::command().print_long_help().map_err(Into::into),
    };

    if let Err(err) = result {
        error!("Error: {:#}", err);
        drop(guard);
        process::exit(1);
    }
}

fn apply_threshold(config: &mut AppConfig, threshold: Option<f64>) -> Result<()> {
    if let Some(threshold) = threshold {
        config.matcher.threshold = threshold;
        config.validate()?;
    }
    Ok(())
}

fn run_database(mut config: AppConfig, threshold: Option<f64>, csv: Option<PathBuf>) -> Result<()> {
    apply_threshold(&mut config, threshold)?;
    let mut store = PgStore::connect(&config.database).context("Error connecting to database")?;
    run_matcher(&config, &mut store, csv)
}

fn run_files(
    mut config: AppConfig,
    imports: &Path,
    stores: &Path,
    threshold: Option<f64>,
    csv: Option<PathBuf>,
) -> Result<()> {
    apply_threshold(&mut config, threshold)?;
    let mut store = MemoryStore::from_csv_files(imports, stores).with_context(|| {
        format!(
            "Error reading {} / {}",
            imports.display(),
            stores.display()
        )
    })?;
    run_matcher(&config, &mut store, csv)
}

fn run_matcher(config: &AppConfig, store: &mut dyn MatchStore, csv: Option<PathBuf>) -> Result<()> {
    let matcher = StoreMatcher::new(config.matcher.clone());
    let reporter = CliReporter::new();
    let run = matcher.run(store, &reporter).context("Matcher run aborted")?;

    report::print_match_set(&run.matches, config.report.max_rows);
    println!();
    print_summary(&run);

    if let Some(path) = csv.or_else(|| config.report.csv_path.clone()) {
        let rows = report::write_csv_file(&run.matches, &path)
            .with_context(|| format!("Error writing {}", path.display()))?;
        info!("Wrote {} rows to {}", rows, path.display());
    }

    Ok(())
}

fn print_summary(run: &MatchRun) {
    info!(
        "Load: {}, Match: {}, Write: {}",
        format!("{:.2}s", run.load_duration.as_secs_f64()).green(),
        format!("{:.2}s", run.score_duration.as_secs_f64()).green(),
        format!("{:.2}s", run.write_duration.as_secs_f64()).green(),
    );
    info!(
        "{} imported records against {} stores: {} matched, {} unmatched",
        format!("{}", run.imported_count).cyan(),
        format!("{}", run.master_count).cyan(),
        format!("{}", run.matches.matched.len()).green(),
        format!("{}", run.matches.unmatched.len()).red(),
    );
    info!(
        "{} rows written to matched_stores",
        format!("{}", run.inserted).green()
    );
    for failed in &run.failed {
        warn!(
            "Import {} not written: {}",
            format!("{}", failed.import_id).red(),
            failed.reason
        );
    }
}

fn print_pair_score(config: &AppConfig, imported_name: &str, master: &MasterStore) {
    let score = scoring::score_pair_detailed(imported_name, master, &config.matcher);
    println!("{}", report::pair_score_table(&score));
    println!(
        "keyword hit: {}, score: {}, {}",
        score.keyword_hit,
        format!("{:.4}", score.score).bold(),
        if scoring::is_accepted(score.score, &config.matcher) {
            format!("accepted (threshold {:.2})", config.matcher.threshold).green()
        } else {
            format!("rejected (threshold {:.2})", config.matcher.threshold).red()
        }
    );
}

fn show_matches(config: &AppConfig) -> Result<()> {
    let mut store = PgStore::connect(&config.database).context("Error connecting to database")?;
    let rows = store.load_matches()?;
    println!("Matched stores ({}):", rows.len());
    println!(
        "{}",
        report::stored_matches_table(&rows, config.report.max_rows)
    );
    Ok(())
}

fn truncate_matches(config: &AppConfig) -> Result<()> {
    match prompt_confirm(
        "Are you SURE you want to delete every row of matched_stores?",
        Some(false),
    ) {
        Ok(true) => {
            let mut store =
                PgStore::connect(&config.database).context("Error connecting to database")?;
            store.clear_matches()?;
            println!("matched_stores truncated");
            Ok(())
        }
        Ok(false) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(default.unwrap_or(false));
        }

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
