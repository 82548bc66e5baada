//! Library-level ranking properties

use bm25_retrieve::{rank, Bm25Index, Bm25Params, RetrievalError};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

fn corpus() -> Vec<Vec<String>> {
    let docs = [
        "revenue grew in the third quarter",
        "operating income fell while revenue grew",
        "the board approved a dividend",
        "net income and operating income",
        "",
        "revenue revenue revenue",
        "dividend policy unchanged",
    ];
    docs.iter().map(|d| d.split_whitespace().map(str::to_string).collect()).collect()
}

#[test]
fn every_document_is_scored() {
    let index = Bm25Index::build(&corpus()).expect("index");
    for query in [vec!["revenue"], vec![], vec!["missing", "terms"], vec!["income", "income"]] {
        assert_eq!(index.score(&query).len(), 7);
    }
}

#[test]
fn top_k_is_a_prefix_of_the_full_ranking() {
    let index = Bm25Index::build(&corpus()).expect("index");
    let scores = index.score(&["revenue", "income"]);
    let full = rank(&scores, None);
    assert_eq!(full.len(), 7);
    for k in 0..=9 {
        let ranked = rank(&scores, Some(k));
        assert_eq!(ranked.len(), k.min(7));
        assert_eq!(ranked.as_slice(), &full[..k.min(7)]);
    }
}

#[test]
fn zero_scores_rank_by_ascending_document() {
    let index = Bm25Index::build(&corpus()).expect("index");
    let ranked = rank(&index.score(&["dividend"]), None);
    let zero_docs: Vec<usize> = ranked.iter().filter(|h| h.score == 0.0).map(|h| h.doc).collect();
    assert_eq!(zero_docs, vec![0, 1, 3, 4, 5]);
    assert_eq!(ranked[0].doc, 6);
}

#[test]
fn empty_corpus_fails_to_build() {
    let empty: Vec<Vec<String>> = Vec::new();
    let err = Bm25Index::build_with_params(&empty, Bm25Params::default()).unwrap_err();
    assert!(matches!(err, RetrievalError::EmptyCorpus));
}

#[test]
fn shared_index_scores_identically_across_threads() {
    let index = Arc::new(Bm25Index::build(&corpus()).expect("index"));
    let expected = index.score(&["operating", "income"]);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || index.score(&["operating", "income"]))
        })
        .collect();
    for handle in handles {
        let scores = handle.join().expect("thread");
        let bits: Vec<u64> = scores.iter().map(|s| s.to_bits()).collect();
        let expected_bits: Vec<u64> = expected.iter().map(|s| s.to_bits()).collect();
        assert_eq!(bits, expected_bits);
    }
}

#[test]
fn batch_retrieve_matches_single_queries() {
    let index = Bm25Index::build(&corpus()).expect("index");
    let queries: BTreeMap<String, Vec<&str>> = BTreeMap::from([
        ("a".to_string(), vec!["revenue"]),
        ("b".to_string(), vec!["dividend", "board"]),
        ("c".to_string(), vec![]),
    ]);

    let results = index.retrieve(&queries, Some(3));
    assert_eq!(results.len(), 3);
    for (id, tokens) in &queries {
        assert_eq!(results[id], rank(&index.score(tokens), Some(3)));
    }
    assert!(results["c"].iter().all(|hit| hit.score == 0.0));
    assert_eq!(results["c"].iter().map(|h| h.doc).collect::<Vec<_>>(), vec![0, 1, 2]);
}
