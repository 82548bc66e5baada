//! Config command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{resolve_config, ScoringArgs};

#[derive(Args)]
pub struct ConfigArgs {
    /// Directory searched for bm25.toml / bm25.yml
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Number of documents to return per query
    #[arg(short = 'k', long, value_name = "N", allow_negative_numbers = true)]
    pub top_k: Option<i64>,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let config = resolve_config(&args.scoring, &args.dir, args.top_k)?;
    config.bm25_params()?;
    config.top_k()?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
