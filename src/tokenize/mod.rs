//! Tokenizers feeding the BM25 index
//!
//! The index treats tokens as opaque, equality-comparable strings. Anything
//! that turns text into a token list can be plugged in through [`Tokenizer`],
//! including plain closures.

use crate::domain::TokenizerKind;
use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+(?:['’\-]\w+)*|[^\w\s]").expect("valid word regex"));

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Word-level tokenizer: word runs (keeping inner apostrophes and hyphens)
/// plus one token per punctuation character. Case is preserved by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer {
    lowercase: bool,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        WORD_RE
            .find_iter(text)
            .map(|m| if self.lowercase { m.as_str().to_lowercase() } else { m.as_str().to_string() })
            .collect()
    }
}

/// Splits on Unicode whitespace only.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer {
    lowercase: bool,
}

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|t| if self.lowercase { t.to_lowercase() } else { t.to_string() })
            .collect()
    }
}

/// Tokenizer selected by configuration.
pub fn tokenizer_for(kind: TokenizerKind, lowercase: bool) -> Box<dyn Tokenizer> {
    match kind {
        TokenizerKind::Word => Box::new(WordTokenizer::new().lowercase(lowercase)),
        TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer::new().lowercase(lowercase)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_tokenizer_splits_punctuation() {
        let tokens = WordTokenizer::new().tokenize("Net revenue rose 12% in Q3, year-over-year.");
        insta::assert_json_snapshot!(tokens, @r#"
        [
          "Net",
          "revenue",
          "rose",
          "12",
          "%",
          "in",
          "Q3",
          ",",
          "year-over-year",
          "."
        ]
        "#);
    }

    #[test]
    fn word_tokenizer_keeps_inner_apostrophes() {
        let tokens = WordTokenizer::new().lowercase(true).tokenize("The company's CEO");
        assert_eq!(tokens, vec!["the", "company's", "ceo"]);
    }

    #[test]
    fn whitespace_tokenizer_keeps_punctuation_attached() {
        let tokens = WhitespaceTokenizer::new().tokenize("  cash, flow\tstatement ");
        assert_eq!(tokens, vec!["cash,", "flow", "statement"]);
    }

    #[test]
    fn closures_are_tokenizers() {
        let upper = |text: &str| -> Vec<String> {
            text.split(',').map(|t| t.trim().to_uppercase()).collect()
        };
        let tokenizer: Box<dyn Tokenizer> = Box::new(upper);
        assert_eq!(tokenizer.tokenize("a, b"), vec!["A", "B"]);
    }

    #[test]
    fn configured_tokenizer_honours_lowercase() {
        let tokenizer = tokenizer_for(TokenizerKind::Whitespace, true);
        assert_eq!(tokenizer.tokenize("EBITDA Margin"), vec!["ebitda", "margin"]);
        assert!(tokenizer_for(TokenizerKind::Word, false).tokenize("").is_empty());
    }
}
