//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{load_index, resolve_config, ScoringArgs};
use crate::domain::OutputFormat;

#[derive(Args)]
pub struct InfoArgs {
    /// Corpus file (.json or .jsonl)
    #[arg(long, value_name = "FILE")]
    pub corpus: PathBuf,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let config = resolve_config(&args.scoring, &args.corpus, None)?;
    let loaded = load_index(&args.corpus, &config)?;
    let stats = loaded.processor.stats()?;

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&stats)?),
        OutputFormat::Text => {
            println!("Corpus: {}", args.corpus.display());
            println!();
            println!("Statistics:");
            println!("  Documents:        {}", stats.documents);
            println!("  Empty documents:  {}", stats.empty_documents);
            println!("  Total tokens:     {}", stats.total_tokens);
            println!("  Avg doc length:   {:.2}", stats.avg_doc_len);
            println!("  Vocabulary:       {}", stats.vocabulary);
            println!();
            println!("Scoring:");
            println!("  k1: {}  b: {}  tokenizer: {:?}", config.k1, config.b, config.tokenizer);
        }
    }

    Ok(())
}
