//! Helpers shared by CLI commands

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::corpus::load_corpus;
use crate::domain::{Config, OutputFormat, TokenizerKind};
use crate::retrieval::Bm25Processor;

/// Scoring, tokenization and output flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Path to config file (bm25.toml or bm25.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// BM25 term-frequency saturation (default 1.5)
    #[arg(long, value_name = "FLOAT")]
    pub k1: Option<f64>,

    /// BM25 length normalization in [0, 1] (default 0.75)
    #[arg(long, value_name = "FLOAT")]
    pub b: Option<f64>,

    /// Tokenizer applied to documents and queries
    #[arg(long, value_name = "KIND")]
    pub tokenizer: Option<TokenizerKind>,

    /// Lowercase tokens
    #[arg(long)]
    pub lowercase: bool,

    /// Text prepended to each query before tokenization
    #[arg(long, value_name = "TEXT")]
    pub query_prompt: Option<String>,

    /// Text prepended to each document before tokenization
    #[arg(long, value_name = "TEXT")]
    pub doc_prompt: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

/// Defaults, config file near `anchor`, environment, then these flags.
pub fn resolve_config(args: &ScoringArgs, anchor: &Path, top_k: Option<i64>) -> Result<Config> {
    let file_config = load_config(anchor, args.config.as_deref())?;
    let overrides = CliOverrides {
        k1: args.k1,
        b: args.b,
        top_k,
        query_prompt: args.query_prompt.clone(),
        doc_prompt: args.doc_prompt.clone(),
        tokenizer: args.tokenizer,
        lowercase: if args.lowercase { Some(true) } else { None },
        format: args.format,
    };
    Ok(merge_cli_with_config(file_config, overrides))
}

/// An initialized processor plus the external id of each document.
pub struct LoadedIndex {
    pub processor: Bm25Processor,
    pub doc_ids: Vec<Option<String>>,
}

pub fn load_index(corpus_path: &Path, config: &Config) -> Result<LoadedIndex> {
    let corpus = load_corpus(corpus_path)
        .with_context(|| format!("Failed to load corpus from {}", corpus_path.display()))?;
    let documents = corpus.into_documents()?;
    let doc_ids: Vec<Option<String>> = documents.iter().map(|doc| doc.id.clone()).collect();

    let mut processor = Bm25Processor::from_config(config)?;
    let tokens = processor.tokenize_documents(&documents);
    processor
        .initialize(&tokens)
        .with_context(|| format!("Failed to index {}", corpus_path.display()))?;

    Ok(LoadedIndex { processor, doc_ids })
}

pub fn write_output(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote results");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
