//! Rendering of rankings as text, JSON or YAML

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::domain::OutputFormat;
use crate::rank::RankedHit;

/// A hit as written to output: 1-based rank, corpus position, external id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedHit {
    pub rank: usize,
    pub doc: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub score: f64,
}

pub fn rendered_hits(hits: &[RankedHit], doc_ids: &[Option<String>]) -> Vec<RenderedHit> {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| RenderedHit {
            rank: i + 1,
            doc: hit.doc,
            id: doc_ids.get(hit.doc).cloned().flatten(),
            score: hit.score,
        })
        .collect()
}

pub fn render_results(
    results: &BTreeMap<String, Vec<RankedHit>>,
    doc_ids: &[Option<String>],
    format: OutputFormat,
) -> Result<String> {
    let rendered: BTreeMap<&str, Vec<RenderedHit>> = results
        .iter()
        .map(|(query_id, hits)| (query_id.as_str(), rendered_hits(hits, doc_ids)))
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rendered)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&rendered)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for (query_id, hits) in &rendered {
                writeln!(out, "{query_id}")?;
                write_text_hits(&mut out, hits, "  ")?;
            }
            Ok(out)
        }
    }
}

/// Rendering for a single query; text output has no query header.
pub fn render_hits(hits: &[RankedHit], doc_ids: &[Option<String>], format: OutputFormat) -> Result<String> {
    let rendered = rendered_hits(hits, doc_ids);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rendered)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&rendered)?),
        OutputFormat::Text => {
            let mut out = String::new();
            if rendered.is_empty() {
                out.push_str("No documents ranked.\n");
            }
            write_text_hits(&mut out, &rendered, "")?;
            Ok(out)
        }
    }
}

fn write_text_hits(out: &mut String, hits: &[RenderedHit], indent: &str) -> std::fmt::Result {
    for hit in hits {
        match &hit.id {
            Some(id) => writeln!(out, "{indent}{}. [{}] {} {:.4}", hit.rank, hit.doc, id, hit.score)?,
            None => writeln!(out, "{indent}{}. [{}] {:.4}", hit.rank, hit.doc, hit.score)?,
        }
    }
    Ok(())
}
