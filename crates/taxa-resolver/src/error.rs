//! Resolver error types

use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type alias for resolver operations
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

#[derive(Error, Debug)]
pub enum ResolveError {
    /// A widening or exclusion option was requested without any reference to
    /// apply it to. Raised before the catalog is touched.
    #[error(
        "Invalid option combination: synonym, subtaxa, or exclusion options require at least one taxon reference"
    )]
    InvalidOptionCombination,

    #[error("Invalid batch size: max_batch_size must be greater than 0")]
    InvalidBatchSize,

    /// The catalog failed; no retry is attempted here.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),
}
