use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "store-matcher")]
#[command(about = "Match imported order rows against the store directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log at debug level (TRACING_LEVEL still wins when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Match the database import against the store directory and rebuild matched_stores
    Run {
        /// Override matcher.threshold
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Also write every imported record with its match status to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Run the matcher over CSV exports instead of the database (nothing is written to the database)
    MatchFiles {
        /// CSV export of excel_import_routes
        imports: PathBuf,

        /// CSV export of stores
        stores: PathBuf,

        /// Override matcher.threshold
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Write every imported record with its match status to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Show how one imported name scores against one directory entry
    Score {
        /// Store name as it appears in the import
        imported_name: String,

        /// Store name in the directory
        store_name: String,

        #[arg(long)]
        dispatch_code: Option<String>,

        #[arg(long)]
        store_code: Option<String>,

        #[arg(long)]
        company: Option<String>,
    },
    /// Print the current contents of matched_stores
    ShowMatches,
    /// Delete every row of matched_stores
    TruncateMatches,
    /// Print configuration values
    PrintConfig,
}
