//! CLI argument merging with config

use crate::domain::{Config, OutputFormat, TokenizerKind};

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub k1: Option<f64>,
    pub b: Option<f64>,
    pub top_k: Option<i64>,
    pub query_prompt: Option<String>,
    pub doc_prompt: Option<String>,
    pub tokenizer: Option<TokenizerKind>,
    pub lowercase: Option<bool>,
    pub format: Option<OutputFormat>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(k1) = cli.k1 {
        base_config.k1 = k1;
    }
    if let Some(b) = cli.b {
        base_config.b = b;
    }
    if let Some(top_k) = cli.top_k {
        base_config.top_k = Some(top_k);
    }

    if let Some(query_prompt) = cli.query_prompt {
        base_config.query_prompt = Some(query_prompt);
    }
    if let Some(doc_prompt) = cli.doc_prompt {
        base_config.doc_prompt = Some(doc_prompt);
    }

    if let Some(tokenizer) = cli.tokenizer {
        base_config.tokenizer = tokenizer;
    }
    if let Some(lowercase) = cli.lowercase {
        base_config.lowercase = lowercase;
    }
    if let Some(format) = cli.format {
        base_config.format = format;
    }

    base_config
}

#[cfg(test)]
mod tests {
    use super::{merge_cli_with_config, CliOverrides};
    use crate::domain::{Config, OutputFormat, TokenizerKind};

    #[test]
    fn cli_overrides_replace_base_values() {
        let base = Config {
            k1: 1.2,
            top_k: Some(10),
            query_prompt: Some("query: ".to_string()),
            ..Config::default()
        };

        let cli = CliOverrides {
            b: Some(0.4),
            top_k: Some(3),
            tokenizer: Some(TokenizerKind::Whitespace),
            lowercase: Some(true),
            format: Some(OutputFormat::Yaml),
            ..CliOverrides::default()
        };

        let merged = merge_cli_with_config(base, cli);
        assert_eq!(merged.k1, 1.2);
        assert_eq!(merged.b, 0.4);
        assert_eq!(merged.top_k, Some(3));
        assert_eq!(merged.query_prompt.as_deref(), Some("query: "));
        assert_eq!(merged.tokenizer, TokenizerKind::Whitespace);
        assert!(merged.lowercase);
        assert_eq!(merged.format, OutputFormat::Yaml);
    }
}
