pub mod config;
pub mod db;
pub mod error;
pub mod matcher;
pub mod model;
pub mod progress;
pub mod report;
pub mod store;

pub use config::AppConfig;
pub use error::Error;
pub use matcher::{MatchRun, MatchSet, StoreMatcher};
pub use progress::{MatchReporter, SilentReporter};
pub use store::{MatchStore, MemoryStore, PgStore};
