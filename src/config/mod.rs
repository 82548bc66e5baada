//! Configuration loading
//!
//! Layers, lowest precedence first: built-in defaults, a config file
//! (`bm25.toml`, `.bm25.toml`, `bm25.yml` or `bm25.yaml` next to the corpus,
//! or the file passed with `--config`), `BM25_*` environment variables, and
//! finally command-line flags via [`merge_cli_with_config`].

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

use crate::domain::Config;

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

pub const CONFIG_FILE_NAMES: &[&str] = &["bm25.toml", ".bm25.toml", "bm25.yml", "bm25.yaml"];

const ENV_PREFIX: &str = "BM25_";

pub fn load_config(anchor: &Path, explicit: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    let file = match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => discover_config(anchor),
    };
    if let Some(path) = &file {
        tracing::debug!(path = %path.display(), "loading config file");
        figment = merge_file(figment, path);
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .with_context(|| match &file {
            Some(path) => format!("Invalid configuration in {}", path.display()),
            None => "Invalid configuration".to_string(),
        })?;
    Ok(config)
}

/// First known config file in `anchor` (or its parent when `anchor` is a file).
pub fn discover_config(anchor: &Path) -> Option<PathBuf> {
    let dir = if anchor.is_file() { anchor.parent()? } else { anchor };
    CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|candidate| candidate.is_file())
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yml" | "yaml") => figment.merge(Yaml::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OutputFormat, TokenizerKind};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_a_file() {
        let dir = TempDir::new().expect("temp dir");
        let config = load_config(dir.path(), None).expect("load");
        assert_eq!(config.k1, Config::default().k1);
        assert_eq!(config.tokenizer, TokenizerKind::Word);
    }

    #[test]
    fn discovered_toml_overrides_defaults() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("bm25.toml"), "b = 0.3\ntop_k = 5\nformat = \"json\"\n")
            .expect("write config");
        let corpus = dir.path().join("corpus.jsonl");
        fs::write(&corpus, "").expect("write corpus");

        let config = load_config(&corpus, None).expect("load");
        assert_eq!(config.b, 0.3);
        assert_eq!(config.top_k, Some(5));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.k1, 1.5);
    }

    #[test]
    fn explicit_yaml_file_is_used() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "tokenizer: whitespace\nlowercase: true\nquery_prompt: \"q: \"\n")
            .expect("write config");

        let config = load_config(dir.path(), Some(&path)).expect("load");
        assert_eq!(config.tokenizer, TokenizerKind::Whitespace);
        assert!(config.lowercase);
        assert_eq!(config.query_prompt.as_deref(), Some("q: "));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let err = load_config(dir.path(), Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn malformed_values_are_reported() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("bm25.toml"), "k1 = \"high\"\n").expect("write config");
        let err = load_config(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }
}
