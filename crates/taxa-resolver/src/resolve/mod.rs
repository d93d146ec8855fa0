//! Taxon reference resolution
//!
//! Turns a list of user-supplied taxon references into the set of catalog
//! ids they denote, optionally widened by synonyms and subtaxa or narrowed by
//! excluding the referenced names themselves.
//!
//! A call runs these phases strictly in order, threading the working set
//! through each one:
//!
//! 0. initial match of every reference
//! 1. snapshot of the original names (spelling-expanded when excluding)
//! 2. synonym or spelling expansion
//! 3. subtaxa expansion
//! 4. one re-expansion when phase 3 added anything
//! 5. exclusion of the original names
//! 6. cap to `max_batch_size` ids (lossy, lowest ids kept)
//!
//! Batches inside a phase may run concurrently; they are merged before the
//! next phase starts.

pub mod batch;
mod expansion;
pub mod subtaxa;

pub use batch::{bounded_batches, cap_ids};
pub use subtaxa::SubtaxaPlan;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use taxa_common::{TaxonId, TaxonKeys, TaxonRecord};
use tracing::{debug, instrument};

use crate::catalog::{CatalogResult, NameCatalog, NameField};
use crate::error::{ResolveError, ResolveResult};
use crate::parser::{normalize_name, ScientificNameParser, StandardNameParser};
use batch::fetch_batched;

/// Default bound on any id or name set sent to the catalog, and on the
/// size of the resolved set.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Records accumulated by the phases, keyed and ordered by id
pub type WorkingSet = BTreeMap<TaxonId, TaxonKeys>;

pub(crate) fn absorb(set: &mut WorkingSet, records: impl IntoIterator<Item = TaxonRecord>) {
    for record in records {
        set.entry(record.id).or_insert_with(|| TaxonKeys::from(record));
    }
}

// ============================================================================
// References
// ============================================================================

/// One taxon reference as supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Reference {
    ById(i64),
    /// Decimal digits, looked up exactly like [`Reference::ById`]
    ByDigitString(String),
    /// A scientific name, with or without author
    ByFreeText(String),
    /// An id the caller has already resolved
    ByHandle(TaxonId),
}

impl Reference {
    /// Classify raw user input: digit-only text is an id, anything else is
    /// a name.
    pub fn classify(input: &str) -> Self {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Reference::ByDigitString(trimmed.to_string())
        } else {
            Reference::ByFreeText(input.to_string())
        }
    }
}

impl From<i64> for Reference {
    fn from(id: i64) -> Self {
        Reference::ById(id)
    }
}

impl From<TaxonId> for Reference {
    fn from(id: TaxonId) -> Self {
        Reference::ByHandle(id)
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    pub include_synonyms: bool,
    /// Every descendant, at any depth
    pub include_subtaxa: bool,
    /// Descendants one level down; ignored when `include_subtaxa` is set
    pub include_immediate_subtaxa: bool,
    pub exclude_original_names: bool,
    pub max_batch_size: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            include_synonyms: false,
            include_subtaxa: false,
            include_immediate_subtaxa: false,
            exclude_original_names: false,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn synonyms(mut self, include: bool) -> Self {
        self.include_synonyms = include;
        self
    }

    pub fn subtaxa(mut self, include: bool) -> Self {
        self.include_subtaxa = include;
        self
    }

    pub fn immediate_subtaxa(mut self, include: bool) -> Self {
        self.include_immediate_subtaxa = include;
        self
    }

    pub fn exclude_original(mut self, exclude: bool) -> Self {
        self.exclude_original_names = exclude;
        self
    }

    pub fn max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = size;
        self
    }

    /// Whether any widening or exclusion flag is set
    pub fn has_modifiers(&self) -> bool {
        self.include_synonyms
            || self.include_subtaxa
            || self.include_immediate_subtaxa
            || self.exclude_original_names
    }

    /// Reject option sets that cannot be applied to `references`
    pub fn validate_for(&self, references: &[Reference]) -> ResolveResult<()> {
        if references.is_empty() && self.has_modifiers() {
            return Err(ResolveError::InvalidOptionCombination);
        }
        if self.max_batch_size == 0 {
            return Err(ResolveError::InvalidBatchSize);
        }
        Ok(())
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves taxon references against a shared, read-only catalog.
///
/// The resolver keeps no state between calls; concurrent calls against the
/// same catalog need no coordination. Repeated-call caching is the caller's
/// business (see [`crate::memo::ResolveMemo`]).
#[derive(Clone)]
pub struct TaxonResolver {
    catalog: Arc<dyn NameCatalog>,
    parser: Arc<dyn ScientificNameParser>,
}

impl std::fmt::Debug for TaxonResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxonResolver").finish_non_exhaustive()
    }
}

impl TaxonResolver {
    pub fn new(catalog: Arc<dyn NameCatalog>, parser: Arc<dyn ScientificNameParser>) -> Self {
        Self { catalog, parser }
    }

    /// Resolver using [`StandardNameParser`]
    pub fn with_standard_parser(catalog: Arc<dyn NameCatalog>) -> Self {
        Self::new(catalog, Arc::new(StandardNameParser::new()))
    }

    pub fn catalog(&self) -> &Arc<dyn NameCatalog> {
        &self.catalog
    }

    /// Resolve `references` to a set of catalog ids.
    ///
    /// References that match nothing contribute nothing. Ambiguous names
    /// contribute every match. The result never holds more than
    /// `options.max_batch_size` ids; larger results are truncated to the
    /// lowest ids and the rest are lost.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidOptionCombination`] when a widening or
    ///   exclusion flag is set without references, before any catalog query
    /// - [`ResolveError::InvalidBatchSize`] when `max_batch_size` is zero
    /// - [`ResolveError::CatalogUnavailable`] when the catalog fails
    #[instrument(
        skip(self, references, options),
        fields(
            references = references.len(),
            synonyms = options.include_synonyms,
            subtaxa = options.include_subtaxa,
            immediate_subtaxa = options.include_immediate_subtaxa,
            exclude_original = options.exclude_original_names,
        )
    )]
    pub async fn resolve(
        &self,
        references: &[Reference],
        options: &ResolveOptions,
    ) -> ResolveResult<BTreeSet<TaxonId>> {
        options.validate_for(references)?;
        if references.is_empty() {
            return Ok(BTreeSet::new());
        }

        let catalog = self.catalog.as_ref();

        let initial = self.initial_matches(references, options.max_batch_size).await?;
        debug!(phase = "initial", matched = initial.len());

        let original_ids: BTreeSet<TaxonId> = if options.exclude_original_names {
            let widened =
                expansion::spelling_expand(catalog, initial.clone(), options.max_batch_size).await?;
            widened.into_keys().collect()
        } else {
            BTreeSet::new()
        };

        let expanded = expansion::expand_equivalents(catalog, initial, options).await?;
        let expanded_len = expanded.len();
        debug!(phase = "expand", size = expanded_len);

        let with_subtaxa = subtaxa::add_subtaxa(catalog, expanded, options).await?;
        debug!(phase = "subtaxa", size = with_subtaxa.len());

        let closed = if with_subtaxa.len() > expanded_len {
            let closed = expansion::expand_equivalents(catalog, with_subtaxa, options).await?;
            debug!(phase = "re-expand", size = closed.len());
            closed
        } else {
            with_subtaxa
        };

        let remaining: BTreeSet<TaxonId> = closed
            .into_keys()
            .filter(|id| !original_ids.contains(id))
            .collect();
        if options.exclude_original_names {
            debug!(phase = "exclude", excluded = original_ids.len(), size = remaining.len());
        }

        Ok(cap_ids(remaining, options.max_batch_size))
    }

    /// Phase 0: look every reference up and merge the matches by id
    async fn initial_matches(
        &self,
        references: &[Reference],
        max_batch_size: usize,
    ) -> ResolveResult<WorkingSet> {
        let mut lookup_ids = BTreeSet::new();
        let mut handles = BTreeSet::new();
        let mut texts = Vec::new();

        for reference in references {
            match reference {
                Reference::ById(id) => {
                    lookup_ids.insert(TaxonId(*id));
                },
                Reference::ByDigitString(digits) => match digits.trim().parse::<TaxonId>() {
                    Ok(id) => {
                        lookup_ids.insert(id);
                    },
                    Err(e) => debug!(reference = %digits, error = %e, "Skipping unusable id"),
                },
                Reference::ByHandle(id) => {
                    handles.insert(*id);
                },
                Reference::ByFreeText(text) => texts.push(text.as_str()),
            }
        }

        let lookup_ids: Vec<TaxonId> = lookup_ids.into_iter().collect();
        let handles: Vec<TaxonId> = handles.into_iter().collect();
        let catalog = self.catalog.as_ref();

        let (by_id, by_handle, by_name) = futures::try_join!(
            fetch_batched(&lookup_ids, max_batch_size, |chunk| catalog.find_by_ids(chunk)),
            fetch_batched(&handles, max_batch_size, |chunk| catalog.pluck(chunk)),
            try_join_all(texts.iter().map(|text| self.match_free_text(text))),
        )?;

        let mut set = WorkingSet::new();
        absorb(&mut set, by_id);
        absorb(&mut set, by_name.into_iter().flatten());
        for keys in by_handle {
            set.entry(keys.id).or_insert(keys);
        }
        Ok(set)
    }

    /// Exact-match lookup of one free-text name.
    ///
    /// An author in the text narrows the lookup to the search form; text the
    /// parser rejects is still tried, cleaned, as a canonical name.
    async fn match_free_text(&self, text: &str) -> CatalogResult<Vec<TaxonRecord>> {
        let (field, value) = match self.parser.parse(text) {
            Some(parsed) if parsed.has_author() => (NameField::SearchForm, parsed.search_form),
            Some(parsed) => (NameField::CanonicalName, parsed.canonical_name),
            None => (NameField::CanonicalName, normalize_name(text)),
        };

        if value.is_empty() {
            return Ok(Vec::new());
        }
        self.catalog.find_by_exact_field(field, &value).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use taxa_common::Rank;

    #[test]
    fn test_classify() {
        assert_eq!(Reference::classify("123"), Reference::ByDigitString("123".to_string()));
        assert_eq!(Reference::classify(" 42 "), Reference::ByDigitString("42".to_string()));
        assert_eq!(
            Reference::classify("Agaricus"),
            Reference::ByFreeText("Agaricus".to_string())
        );
        assert_eq!(Reference::classify("-5"), Reference::ByFreeText("-5".to_string()));
        assert_eq!(Reference::classify(""), Reference::ByFreeText(String::new()));
    }

    #[test]
    fn test_options_defaults() {
        let options = ResolveOptions::default();
        assert!(!options.has_modifiers());
        assert_eq!(options.max_batch_size, DEFAULT_MAX_BATCH_SIZE);

        let options: ResolveOptions =
            serde_json::from_str(r#"{"include_synonyms": true}"#).unwrap();
        assert!(options.include_synonyms);
        assert_eq!(options.max_batch_size, DEFAULT_MAX_BATCH_SIZE);
    }

    #[test]
    fn test_validate_for() {
        let refs = vec![Reference::ById(1)];
        assert!(ResolveOptions::new().validate_for(&[]).is_ok());
        assert!(ResolveOptions::new().subtaxa(true).validate_for(&refs).is_ok());

        for options in [
            ResolveOptions::new().synonyms(true),
            ResolveOptions::new().subtaxa(true),
            ResolveOptions::new().immediate_subtaxa(true),
            ResolveOptions::new().exclude_original(true),
        ] {
            assert!(matches!(
                options.validate_for(&[]),
                Err(ResolveError::InvalidOptionCombination)
            ));
        }

        assert!(matches!(
            ResolveOptions::new().max_batch_size(0).validate_for(&refs),
            Err(ResolveError::InvalidBatchSize)
        ));
    }

    #[test]
    fn test_absorb_keeps_first() {
        let mut set = WorkingSet::new();
        absorb(&mut set, vec![TaxonRecord::new(TaxonId(1), "Agaricus", Rank::Genus)]);
        absorb(
            &mut set,
            vec![
                TaxonRecord::new(TaxonId(1), "Agaricus", Rank::Genus),
                TaxonRecord::new(TaxonId(2), "Boletus", Rank::Genus),
            ],
        );
        assert_eq!(set.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_references_issue_no_queries() {
        let catalog = Arc::new(MemoryCatalog::new(vec![]));
        let resolver = TaxonResolver::with_standard_parser(catalog.clone());

        let ids = resolver.resolve(&[], &ResolveOptions::default()).await.unwrap();
        assert!(ids.is_empty());
        assert_eq!(catalog.query_count(), 0);
    }

    #[tokio::test]
    async fn test_unparseable_text_is_still_looked_up() {
        let catalog = Arc::new(MemoryCatalog::new(vec![TaxonRecord::new(
            TaxonId(3),
            "fungi incertae sedis",
            Rank::Group,
        )]));
        let resolver = TaxonResolver::with_standard_parser(catalog);

        let ids = resolver
            .resolve(
                &[Reference::ByFreeText("  fungi  incertae sedis ".to_string())],
                &ResolveOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(ids, [TaxonId(3)].into_iter().collect());
    }
}
