//! Taxa Resolver
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Resolves taxon references (ids, digit strings, scientific names, or
//! already-resolved handles) into sets of catalog ids, optionally widened by
//! synonyms, misspellings and subtaxa.
//!
//! # Overview
//!
//! - **Catalog**: the read-only [`NameCatalog`] interface, with in-memory and
//!   PostgreSQL implementations
//! - **Parser**: free-text scientific name parsing
//! - **Resolve**: the phased resolution algorithm and its batch bounds
//! - **Memo**: an explicit, caller-owned cache of resolved sets
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use taxa_common::{Rank, TaxonId, TaxonRecord};
//! use taxa_resolver::{MemoryCatalog, Reference, ResolveOptions, TaxonResolver};
//!
//! # tokio_test_block(async {
//! let catalog = Arc::new(MemoryCatalog::new(vec![
//!     TaxonRecord::new(TaxonId(1), "Agaricus", Rank::Genus),
//!     TaxonRecord::new(TaxonId(2), "Agaricus campestris", Rank::Species),
//! ]));
//! let resolver = TaxonResolver::with_standard_parser(catalog);
//!
//! let ids = resolver
//!     .resolve(
//!         &[Reference::classify("Agaricus")],
//!         &ResolveOptions::new().subtaxa(true),
//!     )
//!     .await
//!     .unwrap();
//! assert_eq!(ids.len(), 2);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod memo;
pub mod parser;
pub mod resolve;

// Re-export commonly used types
pub use catalog::{CatalogError, MemoryCatalog, NameCatalog, NameField, PgCatalog, PrefixShape};
pub use config::ResolverConfig;
pub use error::{ResolveError, ResolveResult};
pub use memo::ResolveMemo;
pub use parser::{ParsedName, ScientificNameParser, StandardNameParser};
pub use resolve::{Reference, ResolveOptions, TaxonResolver, DEFAULT_MAX_BATCH_SIZE};
