//! BM25 scoring and ranking

pub mod bm25;
pub mod ranker;

pub use bm25::{Bm25Index, Bm25Params, IndexStats, DEFAULT_B, DEFAULT_K1};
pub use ranker::{rank, validate_top_k, RankedHit};
