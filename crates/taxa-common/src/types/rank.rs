//! Taxonomic rank order
//!
//! Ranks are totally ordered from the most specific (`Form`) to the most
//! general (`Domain`), with the informal `Group` rank last. The derived
//! `Ord` follows declaration order, so `Rank::Species < Rank::Genus`.

use serde::{Deserialize, Serialize};

use crate::error::TaxaError;

/// A taxonomic rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Form,
    Variety,
    Subspecies,
    Species,
    Stirps,
    Subsection,
    Section,
    Subgenus,
    Genus,
    Family,
    Order,
    Class,
    Phylum,
    Kingdom,
    Domain,
    /// Informal aggregate of closely related species ("Amanita muscaria group").
    Group,
}

const ALL_RANKS: [Rank; 16] = [
    Rank::Form,
    Rank::Variety,
    Rank::Subspecies,
    Rank::Species,
    Rank::Stirps,
    Rank::Subsection,
    Rank::Section,
    Rank::Subgenus,
    Rank::Genus,
    Rank::Family,
    Rank::Order,
    Rank::Class,
    Rank::Phylum,
    Rank::Kingdom,
    Rank::Domain,
    Rank::Group,
];

const RANKS_ABOVE_GENUS: [Rank; 6] = [
    Rank::Family,
    Rank::Order,
    Rank::Class,
    Rank::Phylum,
    Rank::Kingdom,
    Rank::Domain,
];

impl Rank {
    /// Every rank, lowest first
    pub fn all() -> &'static [Rank] {
        &ALL_RANKS
    }

    /// The ranks that may appear in an ancestor path, lowest first
    pub fn ranks_above_genus() -> &'static [Rank] {
        &RANKS_ABOVE_GENUS
    }

    /// Position in the total order (0 = `Form`)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_above_genus(self) -> bool {
        RANKS_ABOVE_GENUS.contains(&self)
    }

    /// True for `Genus` and every rank above it. `Group` is not included.
    pub fn is_at_or_above_genus(self) -> bool {
        self == Rank::Genus || self.is_above_genus()
    }

    pub fn is_below_genus(self) -> bool {
        self < Rank::Genus
    }

    pub fn is_species_or_below(self) -> bool {
        self <= Rank::Species
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Form => "Form",
            Rank::Variety => "Variety",
            Rank::Subspecies => "Subspecies",
            Rank::Species => "Species",
            Rank::Stirps => "Stirps",
            Rank::Subsection => "Subsection",
            Rank::Section => "Section",
            Rank::Subgenus => "Subgenus",
            Rank::Genus => "Genus",
            Rank::Family => "Family",
            Rank::Order => "Order",
            Rank::Class => "Class",
            Rank::Phylum => "Phylum",
            Rank::Kingdom => "Kingdom",
            Rank::Domain => "Domain",
            Rank::Group => "Group",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Rank {
    type Err = TaxaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_RANKS
            .iter()
            .copied()
            .find(|rank| rank.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TaxaError::UnknownRank(s.to_string()))
    }
}

impl TryFrom<i16> for Rank {
    type Error = TaxaError;

    /// Ranks are stored as their 1-based position in the order.
    fn try_from(value: i16) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|v| v.checked_sub(1))
            .and_then(|idx| ALL_RANKS.get(idx).copied())
            .ok_or_else(|| TaxaError::UnknownRank(value.to_string()))
    }
}

impl From<Rank> for i16 {
    fn from(rank: Rank) -> Self {
        // at most 16 variants
        rank.index() as i16 + 1
    }
}
