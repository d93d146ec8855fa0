//! `taxa ranks` command implementation
//!
//! Prints the rank order used for hierarchy lookups.

use crate::error::Result;
use colored::Colorize;
use taxa_common::Rank;

/// One line per rank, lowest first
pub fn render() -> String {
    Rank::all()
        .iter()
        .map(|rank| {
            let marker = if rank.is_at_or_above_genus() {
                "  (genus or above)"
            } else {
                ""
            };
            format!("{:>2}  {}{}", i16::from(*rank), rank, marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Show the rank order
pub fn run() -> Result<()> {
    println!("{}", "Ranks (lowest first):".cyan().bold());
    println!("{}", render());
    Ok(())
}
