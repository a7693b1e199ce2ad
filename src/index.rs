//! In-memory inverted index over a line corpus.
//!
//! The index keeps, for each term, a postings list of `(doc_id, count)`
//! pairs in ascending document order, together with the corpus statistics
//! the ranking functions need: document lengths, average document length,
//! document frequency and total occurrences per term.

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::document::{Corpus, DocId};
use crate::error::Result;
use std::collections::HashMap;
use tracing::info;

/// Identifier of a term in the index vocabulary.
pub type TermId = usize;

/// One entry of a postings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub count: u64,
}

#[derive(Debug, Clone, Default)]
struct TermStats {
    postings: Vec<Posting>,
    total_count: u64,
}

/// Inverted index with corpus statistics.
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    analyzer: Analyzer,
    vocabulary: HashMap<String, TermId>,
    terms: Vec<TermStats>,
    doc_sizes: Vec<u64>,
    total_terms: u64,
}

impl InvertedIndex {
    /// Index every document of the corpus.
    pub fn build(corpus: &Corpus, analyzer: Analyzer) -> Self {
        let mut vocabulary: HashMap<String, TermId> = HashMap::new();
        let mut terms: Vec<TermStats> = Vec::new();
        let mut doc_sizes = Vec::with_capacity(corpus.len());
        let mut total_terms = 0;

        for doc in corpus.iter() {
            let counts = analyzer.term_counts(doc.content());
            let size: u64 = counts.values().sum();

            for (term, count) in counts {
                let next_id = terms.len();
                let term_id = *vocabulary.entry(term).or_insert(next_id);
                if term_id == next_id {
                    terms.push(TermStats::default());
                }

                let stats = &mut terms[term_id];
                stats.postings.push(Posting {
                    doc_id: doc.id,
                    count,
                });
                stats.total_count += count;
            }

            doc_sizes.push(size);
            total_terms += size;
        }

        Self {
            analyzer,
            vocabulary,
            terms,
            doc_sizes,
            total_terms,
        }
    }

    /// Analyzer used for both documents and queries.
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Number of documents, including empty ones.
    pub fn num_docs(&self) -> u64 {
        self.doc_sizes.len() as u64
    }

    /// Number of distinct terms.
    pub fn unique_terms(&self) -> usize {
        self.terms.len()
    }

    /// Total number of tokens in the corpus.
    pub fn total_corpus_terms(&self) -> u64 {
        self.total_terms
    }

    /// Average document length in tokens.
    pub fn avg_doc_length(&self) -> f64 {
        if self.doc_sizes.is_empty() {
            0.0
        } else {
            self.total_terms as f64 / self.doc_sizes.len() as f64
        }
    }

    /// Length of a document in tokens; 0 for unknown ids.
    pub fn doc_size(&self, doc_id: DocId) -> u64 {
        self.doc_sizes.get(doc_id as usize).copied().unwrap_or(0)
    }

    /// Look up a term.
    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.vocabulary.get(term).copied()
    }

    /// Postings for a term, in ascending document order.
    pub fn postings(&self, term_id: TermId) -> &[Posting] {
        self.terms
            .get(term_id)
            .map(|t| t.postings.as_slice())
            .unwrap_or(&[])
    }

    /// Number of documents containing the term.
    pub fn doc_freq(&self, term_id: TermId) -> u64 {
        self.postings(term_id).len() as u64
    }

    /// Number of occurrences of the term across the corpus.
    pub fn total_num_occurrences(&self, term_id: TermId) -> u64 {
        self.terms.get(term_id).map(|t| t.total_count).unwrap_or(0)
    }
}

/// Build the index described by a configuration file.
pub fn make_inverted_index(config: &Config) -> Result<InvertedIndex> {
    let corpus_path = config.corpus_path()?;
    let corpus = Corpus::from_line_file(&corpus_path)?;

    let analyzer = match &config.stop_words {
        Some(path) => Analyzer::from_stop_word_file(path)?,
        None => Analyzer::new(),
    };

    let index = InvertedIndex::build(&corpus, analyzer);
    info!(
        corpus = %corpus_path.display(),
        docs = index.num_docs(),
        terms = index.unique_terms(),
        avg_dl = index.avg_doc_length(),
        "Built inverted index"
    );

    Ok(index)
}
