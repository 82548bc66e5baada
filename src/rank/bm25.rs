//! BM25 (Okapi, `+1`-smoothed IDF) index and scorer.
//!
//! The index is built once from an already tokenized corpus and is never
//! mutated afterwards, so a single `Bm25Index` can be shared by reference
//! across any number of scoring threads.

use crate::error::{Result, RetrievalError};
use crate::rank::ranker::{rank, RankedHit};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_K1: f64 = 1.5;
pub const DEFAULT_B: f64 = 0.75;

/// Term-frequency saturation (`k1`) and length normalization (`b`).
///
/// Only obtainable through [`Bm25Params::new`] or `Default`, so every index
/// is built from validated values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bm25Params {
    k1: f64,
    b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: DEFAULT_K1, b: DEFAULT_B }
    }
}

impl Bm25Params {
    /// Validated constructor: `k1` must be finite and non-negative, `b` in `[0, 1]`.
    pub fn new(k1: f64, b: f64) -> Result<Self> {
        if !k1.is_finite() || k1 < 0.0 {
            return Err(RetrievalError::InvalidParameter { name: "k1", value: k1 });
        }
        if !b.is_finite() || !(0.0..=1.0).contains(&b) {
            return Err(RetrievalError::InvalidParameter { name: "b", value: b });
        }
        Ok(Self { k1, b })
    }

    pub fn k1(&self) -> f64 {
        self.k1
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

/// Corpus-level statistics reported by `info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub documents: usize,
    pub total_tokens: usize,
    pub avg_doc_len: f64,
    pub vocabulary: usize,
    pub empty_documents: usize,
}

#[derive(Debug, Clone)]
pub struct Bm25Index {
    params: Bm25Params,
    avg_doc_len: f64,
    total_tokens: usize,
    doc_lengths: Vec<usize>,
    doc_freq: HashMap<String, usize>,
    term_freqs: Vec<HashMap<String, usize>>,
}

impl Bm25Index {
    /// Build an index with the default `k1`/`b`.
    pub fn build<S: AsRef<str>>(corpus: &[Vec<S>]) -> Result<Self> {
        Self::build_with_params(corpus, Bm25Params::default())
    }

    pub fn build_with_params<S: AsRef<str>>(corpus: &[Vec<S>], params: Bm25Params) -> Result<Self> {
        if corpus.is_empty() {
            return Err(RetrievalError::EmptyCorpus);
        }

        let mut doc_lengths = Vec::with_capacity(corpus.len());
        let mut term_freqs = Vec::with_capacity(corpus.len());
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut total_tokens = 0usize;

        for doc in corpus {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for token in doc {
                *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
            }
            for term in counts.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }

            total_tokens += doc.len();
            doc_lengths.push(doc.len());
            term_freqs.push(counts);
        }

        let avg_doc_len = total_tokens as f64 / corpus.len() as f64;
        tracing::debug!(
            documents = corpus.len(),
            vocabulary = doc_freq.len(),
            total_tokens,
            avg_doc_len,
            "built BM25 index"
        );

        Ok(Self { params, avg_doc_len, total_tokens, doc_lengths, doc_freq, term_freqs })
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }

    pub fn doc_count(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn avg_doc_len(&self) -> f64 {
        self.avg_doc_len
    }

    pub fn doc_lengths(&self) -> &[usize] {
        &self.doc_lengths
    }

    /// Number of documents containing `term` at least once.
    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Occurrences of `term` in document `doc` (0 when absent or out of range).
    pub fn term_freq(&self, doc: usize, term: &str) -> usize {
        self.term_freqs.get(doc).and_then(|tf| tf.get(term)).copied().unwrap_or(0)
    }

    /// `ln((N - df + 0.5) / (df + 0.5) + 1)`; finite and non-negative for unseen terms too.
    pub fn idf(&self, term: &str) -> f64 {
        let n = self.doc_count() as f64;
        let df = self.doc_freq(term) as f64;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    /// Score every document against `query`. Index `i` of the result is document `i`.
    pub fn score<S: AsRef<str>>(&self, query: &[S]) -> Vec<f64> {
        let Bm25Params { k1, b } = self.params;
        let weighted: Vec<(&str, f64)> =
            query.iter().map(|t| (t.as_ref(), self.idf(t.as_ref()))).collect();

        self.term_freqs
            .iter()
            .zip(self.doc_lengths.iter())
            .map(|(term_freq, &dl)| {
                let relative_len =
                    if self.avg_doc_len > 0.0 { dl as f64 / self.avg_doc_len } else { 0.0 };
                let length_norm = k1 * (1.0 - b + b * relative_len);

                weighted.iter().fold(0.0, |acc, (term, idf)| {
                    let tf = *term_freq.get(*term).unwrap_or(&0) as f64;
                    // f(t, D) = 0 contributes exactly zero
                    if tf <= 0.0 {
                        return acc;
                    }
                    acc + idf * ((tf * (k1 + 1.0)) / (tf + length_norm))
                })
            })
            .collect()
    }

    /// Score and rank each query independently, in parallel.
    pub fn retrieve<S>(
        &self,
        queries: &BTreeMap<String, Vec<S>>,
        top_k: Option<usize>,
    ) -> BTreeMap<String, Vec<RankedHit>>
    where
        S: AsRef<str> + Sync,
    {
        queries
            .par_iter()
            .map(|(id, tokens)| (id.clone(), rank(&self.score(tokens), top_k)))
            .collect()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.doc_count(),
            total_tokens: self.total_tokens,
            avg_doc_len: self.avg_doc_len,
            vocabulary: self.doc_freq.len(),
            empty_documents: self.doc_lengths.iter().filter(|&&len| len == 0).count(),
        }
    }
}
