//! In-process name catalog
//!
//! Indexes a fixed set of records by id, name, synonym group, and spelling
//! class. Every call is recorded so callers can inspect exactly which
//! queries a resolution issued.

use async_trait::async_trait;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::Mutex;
use taxa_common::{TaxaError, TaxonId, TaxonKeys, TaxonRecord};
use tracing::debug;

use super::patterns::{ancestor_path_pattern, prefix_pattern};
use super::{CatalogError, CatalogResult, NameCatalog, NameField, PrefixShape};

/// A catalog call as seen by [`MemoryCatalog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    FindByIds(Vec<TaxonId>),
    FindByExactField(NameField, String),
    FindByPrefix(Vec<String>, PrefixShape),
    FindByAncestorPath(Vec<String>, bool),
    FindBySynonymGroups(Vec<i64>),
    FindBySpellingClasses(Vec<TaxonId>),
    Pluck(Vec<TaxonId>),
}

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    records: BTreeMap<TaxonId, TaxonRecord>,
    by_canonical_name: HashMap<String, Vec<TaxonId>>,
    by_search_form: HashMap<String, Vec<TaxonId>>,
    by_synonym_group: HashMap<i64, Vec<TaxonId>>,
    by_spelling_class: HashMap<TaxonId, Vec<TaxonId>>,
    batch_limit: Option<usize>,
    log: Mutex<Vec<CatalogQuery>>,
}

impl MemoryCatalog {
    pub fn new(records: impl IntoIterator<Item = TaxonRecord>) -> Self {
        let mut catalog = Self::default();
        for record in records {
            catalog.insert(record);
        }
        debug!(records = catalog.records.len(), "Built in-memory catalog");
        catalog
    }

    /// Load a JSON array of records
    pub fn from_json_str(json: &str) -> Result<Self, TaxaError> {
        let records: Vec<TaxonRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TaxaError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject any set argument larger than `limit`
    pub fn with_batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = Some(limit);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: TaxonId) -> Option<&TaxonRecord> {
        self.records.get(&id)
    }

    /// Ids of records with exactly this canonical name, ascending
    pub fn ids_named(&self, canonical_name: &str) -> Vec<TaxonId> {
        let mut ids = self
            .by_canonical_name
            .get(canonical_name)
            .cloned()
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Every call received so far, oldest first
    pub fn queries(&self) -> Vec<CatalogQuery> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn query_count(&self) -> usize {
        self.log.lock().map(|log| log.len()).unwrap_or_default()
    }

    pub fn reset_queries(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }

    fn insert(&mut self, record: TaxonRecord) {
        let id = record.id;
        if let Some(previous) = self.records.remove(&id) {
            self.unindex(&previous);
        }

        self.by_canonical_name
            .entry(record.canonical_name.clone())
            .or_default()
            .push(id);
        self.by_search_form
            .entry(record.search_form.clone())
            .or_default()
            .push(id);
        if let Some(group) = record.synonym_group_id {
            self.by_synonym_group.entry(group).or_default().push(id);
        }
        self.by_spelling_class
            .entry(record.spelling_class_id())
            .or_default()
            .push(id);

        self.records.insert(id, record);
    }

    fn unindex(&mut self, record: &TaxonRecord) {
        let id = record.id;
        let drop_id = |ids: Option<&mut Vec<TaxonId>>| {
            if let Some(ids) = ids {
                ids.retain(|other| *other != id);
            }
        };
        drop_id(self.by_canonical_name.get_mut(&record.canonical_name));
        drop_id(self.by_search_form.get_mut(&record.search_form));
        if let Some(group) = record.synonym_group_id {
            drop_id(self.by_synonym_group.get_mut(&group));
        }
        drop_id(self.by_spelling_class.get_mut(&record.spelling_class_id()));
    }

    fn record(&self, query: CatalogQuery) {
        if let Ok(mut log) = self.log.lock() {
            log.push(query);
        }
    }

    fn check_batch(&self, size: usize) -> CatalogResult<()> {
        match self.batch_limit {
            Some(limit) if size > limit => Err(CatalogError::BatchTooLarge { size, limit }),
            _ => Ok(()),
        }
    }

    fn collect<'a>(&self, ids: impl IntoIterator<Item = &'a TaxonId>) -> Vec<TaxonRecord> {
        let unique: BTreeSet<&TaxonId> = ids.into_iter().collect();
        unique
            .into_iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }

    fn scan(
        &self,
        pattern: &str,
        field: impl Fn(&TaxonRecord) -> &str,
    ) -> CatalogResult<Vec<TaxonRecord>> {
        let re = Regex::new(pattern)?;
        Ok(self
            .records
            .values()
            .filter(|record| re.is_match(field(record)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NameCatalog for MemoryCatalog {
    async fn find_by_ids(&self, ids: &[TaxonId]) -> CatalogResult<Vec<TaxonRecord>> {
        self.record(CatalogQuery::FindByIds(ids.to_vec()));
        self.check_batch(ids.len())?;
        Ok(self.collect(ids))
    }

    async fn find_by_exact_field(
        &self,
        field: NameField,
        value: &str,
    ) -> CatalogResult<Vec<TaxonRecord>> {
        self.record(CatalogQuery::FindByExactField(field, value.to_string()));
        let index = match field {
            NameField::CanonicalName => &self.by_canonical_name,
            NameField::SearchForm => &self.by_search_form,
        };
        Ok(index.get(value).map(|ids| self.collect(ids)).unwrap_or_default())
    }

    async fn find_by_prefix(
        &self,
        names: &[String],
        shape: PrefixShape,
    ) -> CatalogResult<Vec<TaxonRecord>> {
        self.record(CatalogQuery::FindByPrefix(names.to_vec(), shape));
        self.check_batch(names.len())?;
        if names.is_empty() {
            return Ok(Vec::new());
        }
        self.scan(&prefix_pattern(names, shape), |r| r.canonical_name.as_str())
    }

    async fn find_by_ancestor_path_pattern(
        &self,
        names: &[String],
        anchored: bool,
    ) -> CatalogResult<Vec<TaxonRecord>> {
        self.record(CatalogQuery::FindByAncestorPath(names.to_vec(), anchored));
        self.check_batch(names.len())?;
        if names.is_empty() {
            return Ok(Vec::new());
        }
        self.scan(&ancestor_path_pattern(names, anchored), |r| r.ancestor_path.as_str())
    }

    async fn find_by_synonym_groups(&self, group_ids: &[i64]) -> CatalogResult<Vec<TaxonRecord>> {
        self.record(CatalogQuery::FindBySynonymGroups(group_ids.to_vec()));
        self.check_batch(group_ids.len())?;
        Ok(self.collect(
            group_ids
                .iter()
                .filter_map(|group| self.by_synonym_group.get(group))
                .flatten(),
        ))
    }

    async fn find_by_spelling_classes(
        &self,
        class_ids: &[TaxonId],
    ) -> CatalogResult<Vec<TaxonRecord>> {
        self.record(CatalogQuery::FindBySpellingClasses(class_ids.to_vec()));
        self.check_batch(class_ids.len())?;
        Ok(self.collect(
            class_ids
                .iter()
                .filter_map(|class| self.by_spelling_class.get(class))
                .flatten(),
        ))
    }

    async fn pluck(&self, ids: &[TaxonId]) -> CatalogResult<Vec<TaxonKeys>> {
        self.record(CatalogQuery::Pluck(ids.to_vec()));
        self.check_batch(ids.len())?;
        Ok(self.collect(ids).into_iter().map(TaxonKeys::from).collect())
    }
}
