//! Ancestor path strings
//!
//! An ancestor path lists each ancestor above genus as a `"<Rank>: _<Name>_"`
//! fragment, most general first. Fragments are separated by a newline when
//! built here; readers accept any whitespace between fragments.

use crate::error::TaxaError;
use crate::types::Rank;

/// Helpers for building and reading ancestor paths
pub struct AncestorPath;

impl AncestorPath {
    /// `"<Rank>: _<Name>_"`
    pub fn format_fragment(rank: Rank, name: &str) -> String {
        format!("{}: _{}_", rank, name)
    }

    /// Join `(rank, name)` pairs, most general first
    pub fn build<'a>(lineage: impl IntoIterator<Item = (Rank, &'a str)>) -> String {
        lineage
            .into_iter()
            .map(|(rank, name)| Self::format_fragment(rank, name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse a path into `(rank, name)` pairs in the order they appear
    pub fn parse(path: &str) -> Result<Vec<(Rank, String)>, TaxaError> {
        path.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(parse_fragment)
            .collect()
    }

    /// The last fragment, i.e. the nearest ancestor above genus
    pub fn immediate_parent(path: &str) -> Result<Option<(Rank, String)>, TaxaError> {
        Ok(Self::parse(path)?.pop())
    }
}

fn parse_fragment(fragment: &str) -> Result<(Rank, String), TaxaError> {
    let malformed = || TaxaError::MalformedAncestorPath(fragment.to_string());

    let (rank, rest) = fragment.split_once(':').ok_or_else(malformed)?;
    let name = rest
        .trim()
        .strip_prefix('_')
        .and_then(|n| n.strip_suffix('_'))
        .filter(|n| !n.is_empty())
        .ok_or_else(malformed)?;

    Ok((rank.parse()?, name.to_string()))
}
