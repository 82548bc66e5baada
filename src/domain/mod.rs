//! Core domain types and configuration

use crate::error::Result;
use crate::rank::{validate_top_k, Bm25Params, DEFAULT_B, DEFAULT_K1};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which built-in tokenizer to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    #[default]
    Word,
    Whitespace,
}

/// Output format for rankings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Main configuration for bm25-retrieve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Term-frequency saturation
    #[serde(default = "default_k1")]
    pub k1: f64,

    /// Document-length normalization strength
    #[serde(default = "default_b")]
    pub b: f64,

    /// Number of hits kept per query; unset keeps the full ranking
    #[serde(default, alias = "k", skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i64>,

    /// Text prepended to every query before tokenization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_prompt: Option<String>,

    /// Text prepended to every document before tokenization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_prompt: Option<String>,

    #[serde(default)]
    pub tokenizer: TokenizerKind,

    #[serde(default)]
    pub lowercase: bool,

    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            b: default_b(),
            top_k: None,
            query_prompt: None,
            doc_prompt: None,
            tokenizer: TokenizerKind::Word,
            lowercase: false,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn bm25_params(&self) -> Result<Bm25Params> {
        Bm25Params::new(self.k1, self.b)
    }

    pub fn top_k(&self) -> Result<Option<usize>> {
        validate_top_k(self.top_k)
    }
}

fn default_k1() -> f64 {
    DEFAULT_K1
}

fn default_b() -> f64 {
    DEFAULT_B
}
