//! Synonym and spelling expansion
//!
//! Both relations are equivalence classes keyed by a single column
//! (`synonym_group_id` and `coalesce(correct_spelling_id, id)`), so widening
//! a working set is one bounded lookup per distinct key.

use std::collections::BTreeSet;
use taxa_common::TaxonId;
use tracing::debug;

use super::batch::fetch_batched;
use super::{absorb, ResolveOptions, WorkingSet};
use crate::catalog::NameCatalog;
use crate::error::ResolveResult;

/// Apply the widening rule selected by `options`:
/// synonyms when requested, otherwise spellings unless the caller is
/// excluding the original names, otherwise nothing.
pub(crate) async fn expand_equivalents(
    catalog: &dyn NameCatalog,
    set: WorkingSet,
    options: &ResolveOptions,
) -> ResolveResult<WorkingSet> {
    if options.include_synonyms {
        synonym_expand(catalog, set, options.max_batch_size).await
    } else if !options.exclude_original_names {
        spelling_expand(catalog, set, options.max_batch_size).await
    } else {
        Ok(set)
    }
}

/// Add every member of every synonym group present in `set`.
///
/// Members without a synonym group pass through unchanged.
pub(crate) async fn synonym_expand(
    catalog: &dyn NameCatalog,
    mut set: WorkingSet,
    max_batch_size: usize,
) -> ResolveResult<WorkingSet> {
    let groups: Vec<i64> = set
        .values()
        .filter_map(|keys| keys.synonym_group_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let members = fetch_batched(&groups, max_batch_size, |chunk| {
        catalog.find_by_synonym_groups(chunk)
    })
    .await?;

    let before = set.len();
    absorb(&mut set, members);
    debug!(groups = groups.len(), added = set.len() - before, "Expanded synonym groups");
    Ok(set)
}

/// Add every record sharing a spelling class with a member of `set`
pub(crate) async fn spelling_expand(
    catalog: &dyn NameCatalog,
    mut set: WorkingSet,
    max_batch_size: usize,
) -> ResolveResult<WorkingSet> {
    let classes: Vec<TaxonId> = set
        .values()
        .map(|keys| keys.spelling_class_id())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let members = fetch_batched(&classes, max_batch_size, |chunk| {
        catalog.find_by_spelling_classes(chunk)
    })
    .await?;

    let before = set.len();
    absorb(&mut set, members);
    debug!(classes = classes.len(), added = set.len() - before, "Expanded spelling classes");
    Ok(set)
}
