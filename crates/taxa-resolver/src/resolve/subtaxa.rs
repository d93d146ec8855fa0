//! Subtaxa expansion
//!
//! The hierarchy is only visible through two flat string encodings:
//!
//! - below genus, a child's canonical name starts with its parent's name
//!   followed by a space ("Agaricus" -> "Agaricus campestris")
//! - above genus, a child's ancestor path carries a `"<Rank>: _<name>_"`
//!   fragment for every ancestor ("Family: _Agaricaceae_")
//!
//! Single-word ("upper") names are looked up through ancestor paths, and
//! genera also through the canonical-name prefix. Multi-word ("lower") names
//! use the prefix only, and are dropped when their genus is already an upper
//! name since that genus's prefix covers them.

use std::collections::BTreeSet;
use taxa_common::TaxonKeys;
use tracing::debug;

use super::batch::fetch_batched;
use super::{absorb, ResolveOptions, WorkingSet};
use crate::catalog::{NameCatalog, PrefixShape};
use crate::error::ResolveResult;

/// Name sets for one subtaxa lookup, sorted and without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtaxaPlan {
    /// Names matched against canonical-name prefixes
    pub downward: Vec<String>,
    /// Names matched against ancestor-path fragments
    pub upward: Vec<String>,
}

impl SubtaxaPlan {
    pub fn for_names<'a>(names: impl IntoIterator<Item = &'a TaxonKeys>) -> Self {
        let (upper, lower): (Vec<&TaxonKeys>, Vec<&TaxonKeys>) =
            names.into_iter().partition(|keys| keys.is_upper_name());

        let upper_names: BTreeSet<&str> =
            upper.iter().map(|keys| keys.canonical_name.as_str()).collect();

        let genera = upper
            .iter()
            .filter(|keys| !keys.rank.is_above_genus())
            .map(|keys| keys.canonical_name.as_str());

        let uncovered_lower = lower
            .iter()
            .filter(|keys| !upper_names.contains(keys.genus_word()))
            .map(|keys| keys.canonical_name.as_str());

        let downward: BTreeSet<&str> = genera.chain(uncovered_lower).collect();

        Self {
            downward: downward.into_iter().map(str::to_string).collect(),
            upward: upper_names.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.downward.is_empty() && self.upward.is_empty()
    }
}

/// Add the subtaxa requested by `options` to `set`.
///
/// Full subtaxa match any descendant; immediate subtaxa match one level down,
/// and on the ancestor-path side only single-word names whose nearest
/// ancestor is the requested name.
pub(crate) async fn add_subtaxa(
    catalog: &dyn NameCatalog,
    mut set: WorkingSet,
    options: &ResolveOptions,
) -> ResolveResult<WorkingSet> {
    let (shape, anchored) = if options.include_subtaxa {
        (PrefixShape::AnyDescendant, false)
    } else if options.include_immediate_subtaxa {
        (PrefixShape::ImmediateChild, true)
    } else {
        return Ok(set);
    };

    let plan = SubtaxaPlan::for_names(set.values());
    if plan.is_empty() {
        return Ok(set);
    }

    let max = options.max_batch_size;
    let (below, within) = futures::try_join!(
        fetch_batched(&plan.downward, max, |chunk| catalog.find_by_prefix(chunk, shape)),
        fetch_batched(&plan.upward, max, |chunk| {
            catalog.find_by_ancestor_path_pattern(chunk, anchored)
        }),
    )?;

    // Immediate children found through the ancestor path must themselves be
    // single-word names; species whose path ends at the same ancestor are not
    // counted.
    let within = within
        .into_iter()
        .filter(|record| !anchored || record.is_upper_name());

    let before = set.len();
    absorb(&mut set, below.into_iter().chain(within));
    debug!(
        downward = plan.downward.len(),
        upward = plan.upward.len(),
        immediate = !options.include_subtaxa,
        added = set.len() - before,
        "Expanded subtaxa"
    );
    Ok(set)
}
