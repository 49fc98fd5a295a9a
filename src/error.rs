use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("DATABASE_URL must be set (or database.url in Config.toml)")]
    MissingDatabaseUrl,

    #[error("Connection error: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("Error loading {table}: {source}")]
    Load {
        table: &'static str,
        #[source]
        source: diesel::result::Error,
    },

    #[error("Setup step '{step}' failed: {source}")]
    Setup {
        step: &'static str,
        #[source]
        source: diesel::result::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_names_the_table() {
        let err = Error::Load {
            table: "stores",
            source: diesel::result::Error::NotFound,
        };
        assert_eq!(err.to_string(), "Error loading stores: Record not found");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_missing_database_url_message() {
        let err = Error::MissingDatabaseUrl;
        assert!(err.to_string().starts_with("DATABASE_URL must be set"));
    }
}
