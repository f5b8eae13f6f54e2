//! Transcript normalization
//!
//! Lowercases, strips sentence punctuation, and rewrites spoken synonyms to
//! canonical room names so the downstream matchers see one vocabulary.

use once_cell::sync::Lazy;
use voice_tour_config::{default_synonym_rules, SynonymRule};

static DEFAULT_TABLE: Lazy<SynonymTable> =
    Lazy::new(|| SynonymTable::from_rules(&default_synonym_rules()));

/// Ordered synonym substitution table
///
/// Substitution is substring-based, not whole-word: if a pattern appears
/// anywhere in the transcript its first occurrence is replaced. Each rule
/// fires at most once per call, in table order, and a replacement's output is
/// never re-scanned against later rules.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    rules: Vec<(String, String)>,
}

impl SynonymTable {
    /// Build a table from configuration rules, preserving order
    pub fn from_rules(rules: &[SynonymRule]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|r| (r.pattern.to_lowercase(), r.replacement.to_lowercase()))
                .collect(),
        }
    }

    /// An empty table (no substitutions)
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply the table to already-lowercased text
    ///
    /// Rules are matched against the input text, so a pattern introduced only
    /// by an earlier replacement does not fire.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (pattern, replacement) in &self.rules {
            if text.contains(pattern.as_str()) {
                out = out.replacen(pattern.as_str(), replacement.as_str(), 1);
            }
        }
        out
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

/// Normalize a raw transcript
///
/// Lowercase, trim, remove `[.,!?]`, then apply the synonym table once.
pub fn normalize(raw: &str, table: &SynonymTable) -> String {
    let lowered: String = raw
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?'))
        .collect();
    table.apply(&lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_stripped() {
        let table = SynonymTable::empty();
        assert_eq!(normalize("Show Kitchen!", &table), "show kitchen");
        assert_eq!(
            normalize("Show Kitchen!", &table),
            normalize("show kitchen", &table)
        );
    }

    #[test]
    fn test_synonym_substitution() {
        let table = SynonymTable::from_rules(&[SynonymRule::new("hall", "living room")]);
        let result = normalize("go to the hall", &table);
        assert!(result.contains("living room"));
        assert!(!result.split_whitespace().any(|w| w == "hall"));
    }

    #[test]
    fn test_first_occurrence_only() {
        let table = SynonymTable::from_rules(&[SynonymRule::new("hall", "living room")]);
        assert_eq!(table.apply("hall hall"), "living room hall");
    }

    #[test]
    fn test_multiple_rules_fire() {
        let table = SynonymTable::from_rules(&[
            SynonymRule::new("hall", "living room"),
            SynonymRule::new("washroom", "bathroom"),
        ]);
        let result = table.apply("hall and washroom");
        assert!(result.contains("living room"));
        assert!(result.contains("bathroom"));
    }

    #[test]
    fn test_replacement_output_not_rescanned() {
        // "rasoi" rewrites to "kitchen"; a later "kitchen" rule must not fire
        // off that replacement, only off the original text.
        let table = SynonymTable::from_rules(&[
            SynonymRule::new("rasoi", "kitchen"),
            SynonymRule::new("kitchen", "cookhouse"),
        ]);
        assert_eq!(table.apply("the rasoi"), "the kitchen");
    }

    #[test]
    fn test_default_table_covers_shipped_synonyms() {
        let table = SynonymTable::default();
        assert!(table.apply("washroom").contains("bathroom"));
        assert!(table.apply("mandir").contains("prayer room"));
        assert!(table.len() >= 10);
    }
}
