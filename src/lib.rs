//! bm25-retrieve: in-memory BM25 lexical retrieval
//!
//! This library builds an immutable BM25 index over a tokenized corpus and
//! ranks documents for natural-language queries. Tokenization, corpus input
//! shapes and prompt prefixes live in thin adaptation layers around the core
//! index in [`rank`].

pub mod cli;
pub mod config;
pub mod corpus;
pub mod domain;
pub mod error;
pub mod rank;
pub mod render;
pub mod retrieval;
pub mod tokenize;

pub use corpus::{ColumnarCorpus, CorpusDocument, CorpusInput};
pub use error::{Result, RetrievalError};
pub use rank::{rank, Bm25Index, Bm25Params, RankedHit};
pub use retrieval::Bm25Processor;
pub use tokenize::{Tokenizer, WhitespaceTokenizer, WordTokenizer};
