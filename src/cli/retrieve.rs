//! Retrieve command implementation

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use super::utils::{load_index, resolve_config, write_output, ScoringArgs};
use crate::corpus::load_queries;
use crate::render::render_results;

#[derive(Args)]
pub struct RetrieveArgs {
    /// Corpus file (.json or .jsonl)
    #[arg(long, value_name = "FILE")]
    pub corpus: PathBuf,

    /// Queries file: .jsonl records, a .json id→text object, or a .json record list
    #[arg(long, value_name = "FILE")]
    pub queries: PathBuf,

    /// Number of documents to return per query (default: all)
    #[arg(short = 'k', long, value_name = "N", allow_negative_numbers = true)]
    pub top_k: Option<i64>,

    /// Write results to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

pub fn run(args: RetrieveArgs) -> Result<()> {
    let config = resolve_config(&args.scoring, &args.corpus, args.top_k)?;
    let top_k = config.top_k()?;

    let queries = load_queries(&args.queries)
        .with_context(|| format!("Failed to load queries from {}", args.queries.display()))?;
    if queries.is_empty() {
        tracing::warn!(path = %args.queries.display(), "no queries found");
    }

    let loaded = load_index(&args.corpus, &config)?;

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(queries.len() as u64)
    };
    progress.set_style(ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} queries",
    )?);

    let results = loaded.processor.retrieve_with(&queries, top_k, |_| progress.inc(1))?;
    progress.finish_and_clear();

    let rendered = render_results(&results, &loaded.doc_ids, config.format)?;
    write_output(&rendered, args.output.as_deref())
}
