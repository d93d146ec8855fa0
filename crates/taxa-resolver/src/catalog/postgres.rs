//! PostgreSQL name catalog
//!
//! Reads the `names` table. Id and group sets bind as arrays (`= ANY($1)`);
//! hierarchy lookups bind one regex built by [`super::patterns`] (`~ $1`).

use async_trait::async_trait;
use sqlx::PgPool;
use taxa_common::{Rank, TaxonId, TaxonKeys, TaxonRecord};

use super::patterns::{ancestor_path_pattern, prefix_pattern};
use super::{CatalogError, CatalogResult, NameCatalog, NameField, PrefixShape};

const NAME_COLUMNS: &str = "id, text_name, search_name, author, rank, classification, \
                            synonym_id, correct_spelling_id";

#[derive(Debug, sqlx::FromRow)]
struct NameRow {
    id: i64,
    text_name: String,
    search_name: String,
    author: Option<String>,
    rank: i16,
    classification: Option<String>,
    synonym_id: Option<i64>,
    correct_spelling_id: Option<i64>,
}

impl TryFrom<NameRow> for TaxonRecord {
    type Error = CatalogError;

    fn try_from(row: NameRow) -> Result<Self, Self::Error> {
        let rank = Rank::try_from(row.rank)
            .map_err(|e| CatalogError::InvalidRecord(format!("name {}: {}", row.id, e)))?;
        Ok(TaxonRecord {
            id: TaxonId(row.id),
            canonical_name: row.text_name,
            search_form: row.search_name,
            author: row.author.filter(|a| !a.is_empty()),
            rank,
            ancestor_path: row.classification.unwrap_or_default(),
            synonym_group_id: row.synonym_id,
            correct_spelling_id: row.correct_spelling_id.map(TaxonId),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct KeyRow {
    id: i64,
    text_name: String,
    rank: i16,
    synonym_id: Option<i64>,
    correct_spelling_id: Option<i64>,
}

impl TryFrom<KeyRow> for TaxonKeys {
    type Error = CatalogError;

    fn try_from(row: KeyRow) -> Result<Self, Self::Error> {
        let rank = Rank::try_from(row.rank)
            .map_err(|e| CatalogError::InvalidRecord(format!("name {}: {}", row.id, e)))?;
        Ok(TaxonKeys {
            id: TaxonId(row.id),
            canonical_name: row.text_name,
            rank,
            synonym_group_id: row.synonym_id,
            correct_spelling_id: row.correct_spelling_id.map(TaxonId),
        })
    }
}

/// Name catalog backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `SELECT ... WHERE <condition>` with `param` bound to `$1`
    async fn fetch_where(&self, condition: &str, param: Param) -> CatalogResult<Vec<TaxonRecord>> {
        let sql = format!("SELECT {} FROM names WHERE {} ORDER BY id", NAME_COLUMNS, condition);
        let query = sqlx::query_as::<_, NameRow>(&sql);
        let query = match param {
            Param::Ids(ids) => query.bind(ids),
            Param::Text(text) => query.bind(text),
        };
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(TaxonRecord::try_from).collect()
    }
}

enum Param {
    Ids(Vec<i64>),
    Text(String),
}

fn raw_ids(ids: &[TaxonId]) -> Param {
    Param::Ids(ids.iter().map(|id| id.0).collect())
}

#[async_trait]
impl NameCatalog for PgCatalog {
    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[TaxonId]) -> CatalogResult<Vec<TaxonRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_where("id = ANY($1)", raw_ids(ids)).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_exact_field(
        &self,
        field: NameField,
        value: &str,
    ) -> CatalogResult<Vec<TaxonRecord>> {
        let condition = match field {
            NameField::CanonicalName => "text_name = $1",
            NameField::SearchForm => "search_name = $1",
        };
        self.fetch_where(condition, Param::Text(value.to_string()))
            .await
    }

    #[tracing::instrument(skip(self, names), fields(count = names.len()))]
    async fn find_by_prefix(
        &self,
        names: &[String],
        shape: PrefixShape,
    ) -> CatalogResult<Vec<TaxonRecord>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let pattern = prefix_pattern(names, shape);
        self.fetch_where("text_name ~ $1", Param::Text(pattern)).await
    }

    #[tracing::instrument(skip(self, names), fields(count = names.len()))]
    async fn find_by_ancestor_path_pattern(
        &self,
        names: &[String],
        anchored: bool,
    ) -> CatalogResult<Vec<TaxonRecord>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let pattern = ancestor_path_pattern(names, anchored);
        self.fetch_where("classification ~ $1", Param::Text(pattern))
            .await
    }

    #[tracing::instrument(skip(self, group_ids), fields(count = group_ids.len()))]
    async fn find_by_synonym_groups(&self, group_ids: &[i64]) -> CatalogResult<Vec<TaxonRecord>> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_where("synonym_id = ANY($1)", Param::Ids(group_ids.to_vec()))
            .await
    }

    #[tracing::instrument(skip(self, class_ids), fields(count = class_ids.len()))]
    async fn find_by_spelling_classes(
        &self,
        class_ids: &[TaxonId],
    ) -> CatalogResult<Vec<TaxonRecord>> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_where(
            "id = ANY($1) OR correct_spelling_id = ANY($1)",
            raw_ids(class_ids),
        )
        .await
    }

    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    async fn pluck(&self, ids: &[TaxonId]) -> CatalogResult<Vec<TaxonKeys>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, KeyRow>(
            r#"
            SELECT id, text_name, rank, synonym_id, correct_spelling_id
            FROM names
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(ids.iter().map(|id| id.0).collect::<Vec<i64>>())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaxonKeys::try_from).collect()
    }
}
