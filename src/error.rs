//! Library error type

use thiserror::Error;

/// Errors raised by index construction, scoring and corpus loading.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("cannot build a BM25 index over an empty corpus")]
    EmptyCorpus,

    #[error("BM25 index has not been initialized; call `initialize` first")]
    UninitializedIndex,

    #[error("top_k must not be negative (got {0})")]
    InvalidTopK(i64),

    #[error("invalid BM25 parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("malformed corpus: {0}")]
    CorpusShape(String),

    #[error("unsupported input file {0}: expected .json or .jsonl")]
    UnsupportedInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_problem() {
        assert!(RetrievalError::EmptyCorpus.to_string().contains("empty corpus"));
        assert!(RetrievalError::UninitializedIndex.to_string().contains("initialize"));
        assert_eq!(RetrievalError::InvalidTopK(-3).to_string(), "top_k must not be negative (got -3)");
        let err = RetrievalError::InvalidParameter { name: "b", value: 1.5 };
        assert_eq!(err.to_string(), "invalid BM25 parameter b: 1.5");
    }
}
