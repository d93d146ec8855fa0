//! Scientific name parsing
//!
//! Splits free text such as `"Agaricus campestris var. squamulosus (Rea) Pilát"`
//! into the canonical name and the trailing author citation.

use serde::{Deserialize, Serialize};

/// Structured result of parsing a scientific name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedName {
    pub canonical_name: String,
    /// Canonical name followed by the author, if any
    pub search_form: String,
    pub author: Option<String>,
}

impl ParsedName {
    pub fn has_author(&self) -> bool {
        self.author.as_deref().is_some_and(|a| !a.is_empty())
    }
}

pub trait ScientificNameParser: Send + Sync {
    /// `None` when the text is not recognisable as a scientific name
    fn parse(&self, text: &str) -> Option<ParsedName>;
}

/// Connecting words that introduce an infrageneric or infraspecific epithet.
/// The second element is the form written into the canonical name.
const RANK_CONNECTORS: &[(&str, &str)] = &[
    ("subg.", "subg."),
    ("subgenus", "subg."),
    ("sect.", "sect."),
    ("section", "sect."),
    ("subsect.", "subsect."),
    ("stirps", "stirps"),
    ("subsp.", "subsp."),
    ("ssp.", "subsp."),
    ("var.", "var."),
    ("f.", "f."),
    ("forma", "f."),
];

/// Words that close a name ("Amanita muscaria group")
const GROUP_WORDS: &[&str] = &["group", "gr.", "clade"];

/// Lowercase author particles ("de Bary", "van der Byl")
const AUTHOR_PARTICLES: &[&str] = &["de", "van", "von", "der", "du", "la", "le", "da", "ex"];

/// Rule-based parser for botanical and mycological names
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNameParser;

impl StandardNameParser {
    pub fn new() -> Self {
        Self
    }
}

impl ScientificNameParser for StandardNameParser {
    fn parse(&self, text: &str) -> Option<ParsedName> {
        let cleaned = normalize_name(text);
        let tokens: Vec<&str> = cleaned.split(' ').filter(|t| !t.is_empty()).collect();

        let (&genus, rest) = tokens.split_first()?;
        if !is_capitalised_word(genus) {
            return None;
        }

        let mut canonical = vec![genus.to_string()];
        let mut idx = 0;
        while idx < rest.len() {
            let token = rest[idx];
            let lower = token.to_lowercase();

            if GROUP_WORDS.contains(&lower.as_str()) {
                canonical.push("group".to_string());
                idx += 1;
                break;
            }

            if let Some((_, written)) = RANK_CONNECTORS.iter().find(|(word, _)| *word == lower) {
                match rest.get(idx + 1) {
                    Some(next) if is_epithet(next) || is_capitalised_word(next) => {
                        canonical.push(written.to_string());
                        canonical.push(next.to_string());
                        idx += 2;
                        continue;
                    },
                    _ => break,
                }
            }

            let particle = canonical.len() > 1 && AUTHOR_PARTICLES.contains(&token);
            if is_epithet(token) && !particle {
                canonical.push(token.to_string());
                idx += 1;
                continue;
            }

            break;
        }

        let canonical_name = canonical.join(" ");
        let author = (idx < rest.len()).then(|| rest[idx..].join(" "));
        let search_form = match &author {
            Some(author) => format!("{} {}", canonical_name, author),
            None => canonical_name.clone(),
        };

        Some(ParsedName {
            canonical_name,
            search_form,
            author,
        })
    }
}

/// Strip emphasis markup and collapse whitespace
pub fn normalize_name(text: &str) -> String {
    text.replace(['_', '*'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_capitalised_word(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_uppercase())
        && chars.all(|c| c.is_lowercase() || c == '-')
        && token.chars().count() > 1
}

fn is_epithet(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_lowercase())
        && chars.all(|c| c.is_lowercase() || c == '-')
}
