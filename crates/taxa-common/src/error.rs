//! Error types shared across the taxa crates

use thiserror::Error;

/// Result type alias for taxa operations
pub type Result<T> = std::result::Result<T, TaxaError>;

/// Main error type for the shared layer
#[derive(Error, Debug)]
pub enum TaxaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown rank: {0}")]
    UnknownRank(String),

    #[error("Invalid taxon id: {0}")]
    InvalidTaxonId(String),

    #[error("Malformed ancestor path: {0}")]
    MalformedAncestorPath(String),
}
