//! Text-level retrieval on top of the BM25 index
//!
//! [`Bm25Processor`] owns the tokenizer and the optional prompt prefixes, turns
//! corpus records and query strings into tokens, and delegates scoring to a
//! [`Bm25Index`] built by [`Bm25Processor::initialize`].

use crate::corpus::{CorpusDocument, CorpusInput};
use crate::domain::Config;
use crate::error::{Result, RetrievalError};
use crate::rank::{rank, Bm25Index, Bm25Params, IndexStats, RankedHit};
use crate::tokenize::{tokenizer_for, Tokenizer, WordTokenizer};
use rayon::prelude::*;
use std::collections::BTreeMap;

pub struct Bm25Processor {
    tokenizer: Box<dyn Tokenizer>,
    query_prompt: Option<String>,
    doc_prompt: Option<String>,
    params: Bm25Params,
    index: Option<Bm25Index>,
}

impl Default for Bm25Processor {
    fn default() -> Self {
        Self::with_tokenizer(WordTokenizer::new())
    }
}

impl Bm25Processor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokenizer(tokenizer: impl Tokenizer + 'static) -> Self {
        Self {
            tokenizer: Box::new(tokenizer),
            query_prompt: None,
            doc_prompt: None,
            params: Bm25Params::default(),
            index: None,
        }
    }

    /// Processor configured from tokenizer, prompt and BM25 settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            tokenizer: tokenizer_for(config.tokenizer, config.lowercase),
            query_prompt: config.query_prompt.clone(),
            doc_prompt: config.doc_prompt.clone(),
            params: config.bm25_params()?,
            index: None,
        })
    }

    pub fn query_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.query_prompt = Some(prompt.into());
        self
    }

    pub fn doc_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.doc_prompt = Some(prompt.into());
        self
    }

    pub fn params(mut self, params: Bm25Params) -> Self {
        self.params = params;
        self
    }

    /// Normalize a corpus of either shape and tokenize every document.
    pub fn build_corpus(&self, corpus: CorpusInput) -> Result<Vec<Vec<String>>> {
        let docs = corpus.into_documents()?;
        Ok(self.tokenize_documents(&docs))
    }

    pub fn tokenize_documents(&self, docs: &[CorpusDocument]) -> Vec<Vec<String>> {
        let prompt = self.doc_prompt.as_deref();
        docs.par_iter().map(|doc| self.tokenizer.tokenize(&with_prefix(prompt, &doc.content()))).collect()
    }

    pub fn tokenize_query(&self, query: &str) -> Vec<String> {
        self.tokenizer.tokenize(&with_prefix(self.query_prompt.as_deref(), query))
    }

    /// Build a fresh index over `corpus`, replacing any previous one.
    pub fn initialize(&mut self, corpus: &[Vec<String>]) -> Result<()> {
        let index = Bm25Index::build_with_params(corpus, self.params)?;
        self.index = Some(index);
        Ok(())
    }

    pub fn index(&self) -> Option<&Bm25Index> {
        self.index.as_ref()
    }

    pub fn stats(&self) -> Result<IndexStats> {
        Ok(self.require_index()?.stats())
    }

    /// Ranked hits for one query, truncated to `top_k` when given.
    pub fn compute_scores(&self, query: &str, top_k: Option<usize>) -> Result<Vec<RankedHit>> {
        let index = self.require_index()?;
        let tokens = self.tokenize_query(query);
        if tokens.is_empty() {
            tracing::warn!(query, "query produced no tokens; every document scores 0");
        }
        Ok(rank(&index.score(&tokens), top_k))
    }

    pub fn retrieve(
        &self,
        queries: &BTreeMap<String, String>,
        top_k: Option<usize>,
    ) -> Result<BTreeMap<String, Vec<RankedHit>>> {
        self.retrieve_with(queries, top_k, |_| {})
    }

    /// Like [`Self::retrieve`], calling `on_query` with each query id once it is ranked.
    pub fn retrieve_with<F>(
        &self,
        queries: &BTreeMap<String, String>,
        top_k: Option<usize>,
        on_query: F,
    ) -> Result<BTreeMap<String, Vec<RankedHit>>>
    where
        F: Fn(&str) + Sync,
    {
        let index = self.require_index()?;
        tracing::info!(queries = queries.len(), documents = index.doc_count(), ?top_k, "retrieving");

        Ok(queries
            .par_iter()
            .map(|(id, text)| {
                let hits = rank(&index.score(&self.tokenize_query(text)), top_k);
                on_query(id);
                (id.clone(), hits)
            })
            .collect())
    }

    fn require_index(&self) -> Result<&Bm25Index> {
        self.index.as_ref().ok_or(RetrievalError::UninitializedIndex)
    }
}

fn with_prefix(prefix: Option<&str>, text: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{text}"),
        None => text.to_string(),
    }
}
