//! Search command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{load_index, resolve_config, write_output, ScoringArgs};
use crate::render::render_hits;

#[derive(Args)]
pub struct SearchArgs {
    /// Corpus file (.json or .jsonl)
    #[arg(long, value_name = "FILE")]
    pub corpus: PathBuf,

    /// Query text
    #[arg(short, long, value_name = "TEXT")]
    pub query: String,

    /// Number of documents to return (default: all)
    #[arg(short = 'k', long, value_name = "N", allow_negative_numbers = true)]
    pub top_k: Option<i64>,

    /// Write results to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

pub fn run(args: SearchArgs) -> Result<()> {
    let config = resolve_config(&args.scoring, &args.corpus, args.top_k)?;
    let top_k = config.top_k()?;

    let loaded = load_index(&args.corpus, &config)?;
    let hits = loaded.processor.compute_scores(&args.query, top_k)?;

    let rendered = render_hits(&hits, &loaded.doc_ids, config.format)?;
    write_output(&rendered, args.output.as_deref())
}
