//! Caller-owned memo table for resolved reference sets
//!
//! The resolver itself is stateless. Callers that resolve the same
//! references repeatedly (one query expanding the same taxon filter for
//! every page, say) keep a `ResolveMemo` next to the resolver and go
//! through [`ResolveMemo::get_or_resolve`].
//!
//! Entries never expire; drop or [`clear`](ResolveMemo::clear) the table
//! when the catalog changes.

use std::collections::{BTreeSet, HashMap};
use taxa_common::TaxonId;
use tracing::debug;

use crate::error::ResolveResult;
use crate::resolve::{Reference, ResolveOptions, TaxonResolver};

type MemoKey = (Vec<Reference>, ResolveOptions);

/// Hit and miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
pub struct ResolveMemo {
    entries: HashMap<MemoKey, BTreeSet<TaxonId>>,
    hits: u64,
    misses: u64,
}

impl ResolveMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the memoized set for `(references, options)`, resolving and
    /// storing it on a miss. Failures are returned and not stored.
    pub async fn get_or_resolve(
        &mut self,
        resolver: &TaxonResolver,
        references: &[Reference],
        options: &ResolveOptions,
    ) -> ResolveResult<BTreeSet<TaxonId>> {
        let key = (references.to_vec(), options.clone());

        if let Some(ids) = self.entries.get(&key) {
            self.hits += 1;
            debug!(references = references.len(), "Memo hit");
            return Ok(ids.clone());
        }

        self.misses += 1;
        debug!(references = references.len(), "Memo miss");
        let ids = resolver.resolve(references, options).await?;
        self.entries.insert(key, ids.clone());
        Ok(ids)
    }

    /// Memoized set, if present
    pub fn get(
        &self,
        references: &[Reference],
        options: &ResolveOptions,
    ) -> Option<&BTreeSet<TaxonId>> {
        self.entries.get(&(references.to_vec(), options.clone()))
    }

    /// Drop one entry; returns whether it was present
    pub fn invalidate(&mut self, references: &[Reference], options: &ResolveOptions) -> bool {
        self.entries
            .remove(&(references.to_vec(), options.clone()))
            .is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> MemoStats {
        MemoStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}
