//! Common types used across taxa

pub mod ancestor;
pub mod rank;

pub use ancestor::AncestorPath;
pub use rank::Rank;

use serde::{Deserialize, Serialize};

use crate::error::TaxaError;

/// Stable catalog identifier of a taxon record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonId(pub i64);

impl std::fmt::Display for TaxonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaxonId {
    type Err = TaxaError;

    /// Accepts ASCII digits only; signs and whitespace are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TaxaError::InvalidTaxonId(s.to_string()));
        }
        s.parse::<i64>()
            .map(TaxonId)
            .map_err(|_| TaxaError::InvalidTaxonId(s.to_string()))
    }
}

impl From<i64> for TaxonId {
    fn from(id: i64) -> Self {
        TaxonId(id)
    }
}

// ============================================================================
// Catalog Records
// ============================================================================

/// A taxon record as held by the name catalog.
///
/// Records are read-only to the resolver.
///
/// # Examples
///
/// ```
/// use taxa_common::types::{Rank, TaxonId, TaxonRecord};
///
/// let record = TaxonRecord::new(TaxonId(7), "Agaricus campestris", Rank::Species)
///     .with_author("L.");
/// assert_eq!(record.search_form, "Agaricus campestris L.");
/// assert_eq!(record.genus_word(), "Agaricus");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonRecord {
    pub id: TaxonId,

    /// Scientific name without author, e.g. "Agaricus campestris"
    pub canonical_name: String,

    /// Canonical name followed by the author, used for disambiguated lookup
    pub search_form: String,

    #[serde(default)]
    pub author: Option<String>,

    pub rank: Rank,

    /// Serialized lineage above genus, e.g. "Kingdom: _Fungi_\nFamily: _Agaricaceae_"
    #[serde(default)]
    pub ancestor_path: String,

    #[serde(default)]
    pub synonym_group_id: Option<i64>,

    /// `None` when this record is itself the correct spelling
    #[serde(default)]
    pub correct_spelling_id: Option<TaxonId>,
}

impl TaxonRecord {
    /// Create an authorless record with no lineage or equivalence links
    pub fn new(id: TaxonId, canonical_name: impl Into<String>, rank: Rank) -> Self {
        let canonical_name = canonical_name.into();
        Self {
            id,
            search_form: canonical_name.clone(),
            canonical_name,
            author: None,
            rank,
            ancestor_path: String::new(),
            synonym_group_id: None,
            correct_spelling_id: None,
        }
    }

    /// Set the author and rebuild the search form
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        self.search_form = format!("{} {}", self.canonical_name, author);
        self.author = Some(author);
        self
    }

    pub fn with_ancestor_path(mut self, path: impl Into<String>) -> Self {
        self.ancestor_path = path.into();
        self
    }

    pub fn with_synonym_group(mut self, group: i64) -> Self {
        self.synonym_group_id = Some(group);
        self
    }

    pub fn misspelling_of(mut self, correct: TaxonId) -> Self {
        self.correct_spelling_id = Some(correct);
        self
    }

    /// `coalesce(correct_spelling_id, id)`
    pub fn spelling_class_id(&self) -> TaxonId {
        self.correct_spelling_id.unwrap_or(self.id)
    }

    /// Genus-or-above names are single words
    pub fn is_upper_name(&self) -> bool {
        !self.canonical_name.contains(' ')
    }

    pub fn genus_word(&self) -> &str {
        genus_word(&self.canonical_name)
    }
}

/// Narrow projection of a record: the fields the resolver reasons over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonKeys {
    pub id: TaxonId,
    pub canonical_name: String,
    pub rank: Rank,
    pub synonym_group_id: Option<i64>,
    pub correct_spelling_id: Option<TaxonId>,
}

impl TaxonKeys {
    pub fn spelling_class_id(&self) -> TaxonId {
        self.correct_spelling_id.unwrap_or(self.id)
    }

    pub fn is_upper_name(&self) -> bool {
        !self.canonical_name.contains(' ')
    }

    pub fn genus_word(&self) -> &str {
        genus_word(&self.canonical_name)
    }
}

impl From<&TaxonRecord> for TaxonKeys {
    fn from(record: &TaxonRecord) -> Self {
        Self {
            id: record.id,
            canonical_name: record.canonical_name.clone(),
            rank: record.rank,
            synonym_group_id: record.synonym_group_id,
            correct_spelling_id: record.correct_spelling_id,
        }
    }
}

impl From<TaxonRecord> for TaxonKeys {
    fn from(record: TaxonRecord) -> Self {
        Self {
            id: record.id,
            canonical_name: record.canonical_name,
            rank: record.rank,
            synonym_group_id: record.synonym_group_id,
            correct_spelling_id: record.correct_spelling_id,
        }
    }
}

fn genus_word(name: &str) -> &str {
    name.split(' ').next().unwrap_or(name)
}
