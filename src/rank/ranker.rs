//! Top-k ranking over a dense score vector

use crate::error::{Result, RetrievalError};
use serde::Serialize;

/// One ranked document: its corpus position and BM25 score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedHit {
    pub doc: usize,
    pub score: f64,
}

/// Sort `scores` (index = document) by descending score and keep the first `top_k`.
///
/// Exactly equal scores keep ascending document order. `None` keeps everything,
/// `Some(0)` yields an empty ranking.
pub fn rank(scores: &[f64], top_k: Option<usize>) -> Vec<RankedHit> {
    let limit = top_k.unwrap_or(scores.len()).min(scores.len());
    if limit == 0 {
        return Vec::new();
    }

    let mut hits: Vec<RankedHit> =
        scores.iter().enumerate().map(|(doc, &score)| RankedHit { doc, score }).collect();
    hits.sort_by(|a, b| {
        sort_key(b.score).total_cmp(&sort_key(a.score)).then_with(|| a.doc.cmp(&b.doc))
    });
    hits.truncate(limit);
    hits
}

/// NaN ranks below every real score; `-0.0` ties with `0.0`.
fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score + 0.0
    }
}

/// Convert a signed `top_k` from configuration into the ranking limit.
pub fn validate_top_k(top_k: Option<i64>) -> Result<Option<usize>> {
    match top_k {
        None => Ok(None),
        Some(k) if k < 0 => Err(RetrievalError::InvalidTopK(k)),
        Some(k) => Ok(Some(usize::try_from(k).unwrap_or(usize::MAX))),
    }
}
