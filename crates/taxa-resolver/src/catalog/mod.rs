//! Read-only name catalog interface
//!
//! The resolver never builds query text itself. It talks to the catalog
//! through the narrow operations below, each taking an identifier or name
//! set the caller has already bounded to the configured batch size.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryCatalog`]: an indexed in-process catalog (tests, JSON files)
//! - [`PgCatalog`]: a PostgreSQL `names` table accessed through SQLx

pub mod memory;
pub mod patterns;
pub mod postgres;

pub use memory::{CatalogQuery, MemoryCatalog};
pub use postgres::PgCatalog;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use taxa_common::{TaxonId, TaxonKeys, TaxonRecord};
use thiserror::Error;

/// Catalog failures. The resolver surfaces these unchanged.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid catalog pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Batch of {size} exceeds the catalog limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    #[error("Catalog returned an invalid record: {0}")]
    InvalidRecord(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Fields that support exact-match lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    CanonicalName,
    SearchForm,
}

/// Shape of a downward canonical-name match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixShape {
    /// `"<name> "` followed by anything
    AnyDescendant,
    /// `"<name> <word>"` optionally followed by one more word, nothing deeper
    ImmediateChild,
}

#[async_trait]
pub trait NameCatalog: Send + Sync {
    async fn find_by_ids(&self, ids: &[TaxonId]) -> CatalogResult<Vec<TaxonRecord>>;

    async fn find_by_exact_field(
        &self,
        field: NameField,
        value: &str,
    ) -> CatalogResult<Vec<TaxonRecord>>;

    /// Records whose canonical name extends one of `names` in the given shape
    async fn find_by_prefix(
        &self,
        names: &[String],
        shape: PrefixShape,
    ) -> CatalogResult<Vec<TaxonRecord>>;

    /// Records whose ancestor path contains a `"<Rank>: _<name>_"` fragment
    /// for one of `names`; with `anchored` the fragment must end the path.
    async fn find_by_ancestor_path_pattern(
        &self,
        names: &[String],
        anchored: bool,
    ) -> CatalogResult<Vec<TaxonRecord>>;

    /// Every member of the given synonym groups
    async fn find_by_synonym_groups(&self, group_ids: &[i64]) -> CatalogResult<Vec<TaxonRecord>>;

    /// Records whose id, or whose correct-spelling id, is in `class_ids`
    async fn find_by_spelling_classes(
        &self,
        class_ids: &[TaxonId],
    ) -> CatalogResult<Vec<TaxonRecord>>;

    /// Key projection without materializing full records
    async fn pluck(&self, ids: &[TaxonId]) -> CatalogResult<Vec<TaxonKeys>>;
}
