//! Regular expressions for hierarchy lookups
//!
//! Every pattern is a single alternation over escaped names and uses only
//! syntax shared by the `regex` crate and PostgreSQL's `~` operator, so both
//! catalogs match exactly the same records.

use taxa_common::Rank;

use super::PrefixShape;

/// `(?:A|B|C)` over regex-escaped names
pub fn alternation(names: &[String]) -> String {
    let escaped: Vec<String> = names.iter().map(|name| regex::escape(name)).collect();
    format!("(?:{})", escaped.join("|"))
}

/// Canonical-name pattern for a downward lookup
pub fn prefix_pattern(names: &[String], shape: PrefixShape) -> String {
    let names = alternation(names);
    match shape {
        PrefixShape::AnyDescendant => format!("^{} ", names),
        PrefixShape::ImmediateChild => {
            format!("^{} [^[:space:]]+( [^[:space:]]+)?$", names)
        },
    }
}

/// `(?:Family|Order|...)` over the ranks an ancestor path may carry
fn rank_alternation() -> String {
    let ranks: Vec<&str> = Rank::ranks_above_genus().iter().map(|rank| rank.as_str()).collect();
    format!("(?:{})", ranks.join("|"))
}

/// Ancestor-path pattern matching a `"<Rank>: _<name>_"` fragment
pub fn ancestor_path_pattern(names: &[String], anchored: bool) -> String {
    let fragment = format!("{}: _{}_", rank_alternation(), alternation(names));
    if anchored {
        format!("{}[[:space:]]*$", fragment)
    } else {
        fragment
    }
}
