//! bm25-retrieve: rank documents against queries with in-memory BM25
//!
//! Loads a JSON/JSONL corpus, builds a BM25 index, and prints ranked
//! documents for one query (`search`) or a file of queries (`retrieve`).

use anyhow::Result;

fn main() -> Result<()> {
    bm25_retrieve::cli::run()
}
