//! Test helpers for resolver integration tests
//!
//! This module provides:
//! - The fixture catalog
//! - A parser wrapper that counts invocations
//! - Id set shorthands
#![allow(dead_code)]

pub mod fixtures;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use taxa_common::TaxonId;
use taxa_resolver::catalog::CatalogQuery;
use taxa_resolver::{
    MemoryCatalog, ParsedName, ScientificNameParser, StandardNameParser, TaxonResolver,
};

// Re-export fixtures for convenience
pub use fixtures::*;

pub fn fixture_catalog() -> Arc<MemoryCatalog> {
    Arc::new(MemoryCatalog::new(fixture_records()))
}

pub fn resolver(catalog: &Arc<MemoryCatalog>) -> TaxonResolver {
    TaxonResolver::with_standard_parser(catalog.clone())
}

/// Resolver whose parser calls can be counted
pub fn counting_resolver(catalog: &Arc<MemoryCatalog>) -> (TaxonResolver, Arc<CountingParser>) {
    let parser = Arc::new(CountingParser::default());
    let resolver = TaxonResolver::new(catalog.clone(), parser.clone());
    (resolver, parser)
}

pub fn ids(raw: &[i64]) -> BTreeSet<TaxonId> {
    raw.iter().copied().map(TaxonId).collect()
}

/// Name lists of every prefix query the catalog has seen
pub fn prefix_queries(catalog: &MemoryCatalog) -> Vec<Vec<String>> {
    catalog
        .queries()
        .into_iter()
        .filter_map(|query| match query {
            CatalogQuery::FindByPrefix(names, _) => Some(names),
            _ => None,
        })
        .collect()
}

/// Number of synonym or spelling widening queries the catalog has seen
pub fn equivalence_queries(catalog: &MemoryCatalog) -> usize {
    catalog
        .queries()
        .iter()
        .filter(|query| {
            matches!(
                query,
                CatalogQuery::FindBySpellingClasses(_) | CatalogQuery::FindBySynonymGroups(_)
            )
        })
        .count()
}

/// Sizes of every set-valued query the catalog has seen
pub fn batch_sizes(catalog: &MemoryCatalog) -> Vec<usize> {
    catalog
        .queries()
        .into_iter()
        .filter_map(|query| match query {
            CatalogQuery::FindByIds(ids) | CatalogQuery::Pluck(ids) => Some(ids.len()),
            CatalogQuery::FindBySpellingClasses(ids) => Some(ids.len()),
            CatalogQuery::FindByPrefix(names, _) => Some(names.len()),
            CatalogQuery::FindByAncestorPath(names, _) => Some(names.len()),
            CatalogQuery::FindBySynonymGroups(groups) => Some(groups.len()),
            CatalogQuery::FindByExactField(..) => None,
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct CountingParser {
    calls: AtomicUsize,
}

impl CountingParser {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ScientificNameParser for CountingParser {
    fn parse(&self, text: &str) -> Option<ParsedName> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StandardNameParser::new().parse(text)
    }
}
