//! Text analysis: lowercase alphanumeric tokens with optional stop words.

use crate::error::{EvalError, Result};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Splits text into normalized terms.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    stop_words: HashSet<String>,
}

impl Analyzer {
    /// Analyzer without a stop-word list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer that drops the given words.
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { stop_words }
    }

    /// Load a stop-word list, one word per line.
    pub fn from_stop_word_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
        Ok(Self::with_stop_words(content.lines()))
    }

    /// Tokenize text in order of appearance.
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .filter(move |t| !self.stop_words.contains(t))
    }

    /// Term counts for a piece of text. Ordered so scoring is deterministic.
    pub fn term_counts(&self, text: &str) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        for token in self.tokens(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_lowercase_and_split() {
        let analyzer = Analyzer::new();
        let tokens: Vec<_> = analyzer.tokens("Shock-wave, BOUNDARY layer!").collect();
        assert_eq!(tokens, vec!["shock", "wave", "boundary", "layer"]);
    }

    #[test]
    fn test_stop_words_removed() {
        let analyzer = Analyzer::with_stop_words(["the", "Of", ""]);
        let tokens: Vec<_> = analyzer.tokens("The theory of the wing").collect();
        assert_eq!(tokens, vec!["theory", "wing"]);
    }

    #[test]
    fn test_term_counts() {
        let analyzer = Analyzer::new();
        let counts = analyzer.term_counts("flow over flow plate");
        assert_eq!(counts.get("flow"), Some(&2));
        assert_eq!(counts.get("plate"), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_empty_text() {
        let analyzer = Analyzer::new();
        assert!(analyzer.term_counts("  ,.;  ").is_empty());
    }
}
