//! Error types for the taxa CLI
//!
//! Every variant is user-facing: the message says what went wrong and what to
//! try next.

use taxa_common::TaxaError;
use taxa_resolver::db::DbError;
use taxa_resolver::ResolveError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Neither a catalog file nor a database was given
    #[error("No catalog configured. Pass --catalog <FILE> or --database-url <URL> (or set DATABASE_URL).")]
    NoCatalog,

    /// The JSON catalog could not be read
    #[error("Failed to load catalog '{path}': {source}. Check that the file exists and holds a JSON array of name records.")]
    CatalogLoad {
        path: String,
        #[source]
        source: TaxaError,
    },

    /// Connecting to the catalog database failed
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Resolution failed
    #[error("{0}. Run 'taxa resolve --help' for the accepted flags.")]
    Resolve(#[from] ResolveError),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables.")]
    Config(String),

    /// JSON output failed
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
