//! Corpus and query inputs
//!
//! Two corpus shapes are accepted: a list of `{title, text}` records, or a
//! columnar `{title: [...], text: [...]}` object. Both are normalized to a
//! list of [`CorpusDocument`] before anything is tokenized.

use crate::error::{Result, RetrievalError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A single corpus record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// External identifier (`_id` in BEIR-style files)
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub text: String,
}

impl CorpusDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// `"{title} {text}"` trimmed, or the trimmed text when there is no title.
    pub fn content(&self) -> String {
        match &self.title {
            Some(title) => format!("{} {}", title, self.text).trim().to_string(),
            None => self.text.trim().to_string(),
        }
    }
}

/// Column-oriented corpus
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ColumnarCorpus {
    #[serde(default, alias = "_id")]
    pub id: Option<Vec<String>>,

    #[serde(default)]
    pub title: Option<Vec<String>>,

    pub text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CorpusInput {
    RowWise(Vec<CorpusDocument>),
    Columnar(ColumnarCorpus),
}

impl CorpusInput {
    pub fn len(&self) -> usize {
        match self {
            CorpusInput::RowWise(docs) => docs.len(),
            CorpusInput::Columnar(columns) => columns.text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize either shape into row records.
    pub fn into_documents(self) -> Result<Vec<CorpusDocument>> {
        match self {
            CorpusInput::RowWise(docs) => Ok(docs),
            CorpusInput::Columnar(ColumnarCorpus { id, title, text }) => {
                check_column("title", title.as_ref(), text.len())?;
                check_column("_id", id.as_ref(), text.len())?;

                let mut ids = id.map(Vec::into_iter);
                let mut titles = title.map(Vec::into_iter);
                Ok(text
                    .into_iter()
                    .map(|text| CorpusDocument {
                        id: ids.as_mut().and_then(Iterator::next),
                        title: titles.as_mut().and_then(Iterator::next),
                        text,
                    })
                    .collect())
            }
        }
    }
}

fn check_column(name: &str, column: Option<&Vec<String>>, expected: usize) -> Result<()> {
    match column {
        Some(values) if values.len() != expected => Err(RetrievalError::CorpusShape(format!(
            "column `{name}` has {} entries but `text` has {expected}",
            values.len()
        ))),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize)]
struct QueryRecord {
    #[serde(alias = "_id")]
    id: String,
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QueryFile {
    Map(BTreeMap<String, String>),
    Records(Vec<QueryRecord>),
}

/// Load a corpus from `.jsonl` (one record per line) or `.json` (records or columns).
pub fn load_corpus(path: &Path) -> Result<CorpusInput> {
    let corpus = match InputKind::of(path)? {
        InputKind::JsonLines => CorpusInput::RowWise(read_json_lines(path)?),
        InputKind::Json => serde_json::from_reader(BufReader::new(File::open(path)?))?,
    };
    tracing::debug!(path = %path.display(), documents = corpus.len(), "loaded corpus");
    Ok(corpus)
}

/// Load queries keyed by id from `.jsonl` records, a `.json` id→text object, or a `.json` record list.
pub fn load_queries(path: &Path) -> Result<BTreeMap<String, String>> {
    let records = match InputKind::of(path)? {
        InputKind::JsonLines => read_json_lines::<QueryRecord>(path)?,
        InputKind::Json => {
            let file: QueryFile = serde_json::from_reader(BufReader::new(File::open(path)?))?;
            match file {
                QueryFile::Map(map) => return Ok(map),
                QueryFile::Records(records) => records,
            }
        }
    };

    let mut queries = BTreeMap::new();
    for record in records {
        if queries.insert(record.id.clone(), record.text).is_some() {
            tracing::warn!(query_id = %record.id, "duplicate query id; keeping the last one");
        }
    }
    Ok(queries)
}

enum InputKind {
    Json,
    JsonLines,
}

impl InputKind {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(InputKind::Json),
            Some("jsonl") => Ok(InputKind::JsonLines),
            _ => Err(RetrievalError::UnsupportedInput(path.display().to_string())),
        }
    }
}

fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}
