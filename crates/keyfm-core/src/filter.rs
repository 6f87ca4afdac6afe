//! Name filtering for keyed entries.
//!
//! Filters run over the flat entry list before grouping, so a match deep in
//! the tree still pulls in its synthesized parent folders.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

use crate::entry::KeyedEntry;
use crate::nfc_string;

/// How the filter text is matched against keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Every space-separated term must appear in the key (case-insensitive).
    #[default]
    Terms,
    /// The whole query must fuzzy-match the key.
    Fuzzy,
}

/// Keeps the entries whose key matches `query` under `mode`.
///
/// An empty query keeps everything. Returns a new `Vec`; the input is
/// never mutated.
pub fn filter_entries(entries: &[KeyedEntry], query: &str, mode: FilterMode) -> Vec<KeyedEntry> {
    if query.is_empty() {
        return entries.to_vec();
    }
    match mode {
        FilterMode::Terms => filter_by_terms(entries, query),
        FilterMode::Fuzzy => fuzzy_filter(entries, query)
            .into_iter()
            .map(|m| m.entry)
            .collect(),
    }
}

/// Keeps entries whose lower-cased key contains every space-separated term.
pub fn filter_by_terms(entries: &[KeyedEntry], query: &str) -> Vec<KeyedEntry> {
    let query = nfc_string(&query.to_lowercase());
    let terms: Vec<&str> = query.split(' ').collect();
    entries
        .iter()
        .filter(|e| {
            let key = nfc_string(&e.key().to_lowercase());
            terms.iter().all(|term| key.contains(term))
        })
        .cloned()
        .collect()
}

/// A keyed entry paired with its fuzzy match score and the byte indices
/// in the entry key that matched the query.
#[derive(Debug, Clone)]
pub struct FuzzyMatch {
    entry: KeyedEntry,
    score: i64,
    matched_indices: Vec<usize>,
}

impl FuzzyMatch {
    /// The matching entry.
    #[must_use]
    pub fn entry(&self) -> &KeyedEntry {
        &self.entry
    }

    /// Match score; higher is better.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Byte indices in the entry key that matched the query.
    #[must_use]
    pub fn matched_indices(&self) -> &[usize] {
        &self.matched_indices
    }
}

/// Performs fuzzy matching of `query` against each entry's key.
///
/// Returns matches sorted by score (highest first). When `query` is empty
/// every entry is returned with a score of `0`.
pub fn fuzzy_filter(entries: &[KeyedEntry], query: &str) -> Vec<FuzzyMatch> {
    if query.is_empty() {
        return entries
            .iter()
            .map(|e| FuzzyMatch {
                entry: e.clone(),
                score: 0,
                matched_indices: Vec::new(),
            })
            .collect();
    }

    let matcher = SkimMatcherV2::default();

    let mut matches: Vec<FuzzyMatch> = entries
        .iter()
        .filter_map(|e| {
            matcher
                .fuzzy_indices(e.key(), query)
                .map(|(score, indices)| FuzzyMatch {
                    entry: e.clone(),
                    score,
                    matched_indices: indices,
                })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<KeyedEntry> {
        [
            "photos/cats/tabby.png",
            "photos/dogs/rex.jpg",
            "docs/Cat Care.pdf",
            "music/song.mp3",
        ]
        .into_iter()
        .map(KeyedEntry::new)
        .collect()
    }

    fn keys(entries: &[KeyedEntry]) -> Vec<&str> {
        entries.iter().map(KeyedEntry::key).collect()
    }

    #[test]
    fn empty_query_keeps_everything() {
        let all = entries();
        assert_eq!(filter_entries(&all, "", FilterMode::Terms), all);
        assert_eq!(filter_entries(&all, "", FilterMode::Fuzzy), all);
    }

    #[test]
    fn single_term_is_case_insensitive() {
        let result = filter_entries(&entries(), "CAT", FilterMode::Terms);
        assert_eq!(keys(&result), vec!["photos/cats/tabby.png", "docs/Cat Care.pdf"]);
    }

    #[test]
    fn every_term_must_match() {
        let result = filter_entries(&entries(), "photos png", FilterMode::Terms);
        assert_eq!(keys(&result), vec!["photos/cats/tabby.png"]);
    }

    #[test]
    fn terms_match_anywhere_in_key() {
        let result = filter_entries(&entries(), "dogs/", FilterMode::Terms);
        assert_eq!(keys(&result), vec!["photos/dogs/rex.jpg"]);
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter_entries(&entries(), "zzz", FilterMode::Terms).is_empty());
    }

    #[test]
    fn fuzzy_matches_scattered_letters() {
        let result = filter_entries(&entries(), "msng", FilterMode::Fuzzy);
        assert_eq!(keys(&result), vec!["music/song.mp3"]);
    }

    #[test]
    fn fuzzy_filter_reports_indices() {
        let matches = fuzzy_filter(&entries(), "rex");
        assert!(!matches.is_empty());
        let best = &matches[0];
        assert_eq!(best.entry().key(), "photos/dogs/rex.jpg");
        assert_eq!(best.matched_indices().len(), 3);
        assert!(best.score() > 0);
    }

    #[test]
    fn fuzzy_empty_query_scores_zero() {
        let matches = fuzzy_filter(&entries(), "");
        assert_eq!(matches.len(), 4);
        assert!(matches.iter().all(|m| m.score() == 0));
    }
}
