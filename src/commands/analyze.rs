//! `analyze` subcommand: analyze a corpus loaded from a JSON file
//!
//! The input file holds an array of raw post records (the shape a fetcher
//! produces). Records that fail validation are logged and skipped; one bad
//! record never aborts the batch.

use crate::analytics::LexiconScorer;
use crate::models::{Language, Post, RawPost};
use crate::pipeline::{analyze, AnalysisConfig};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::warn;

/// Analyze a corpus file and print the result
pub async fn analyze_file(input: PathBuf, lang: Option<String>, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read corpus file {}", input.display()))?;
    let raw_posts: Vec<RawPost> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse corpus file {}", input.display()))?;

    let total = raw_posts.len();
    let mut corpus = Vec::with_capacity(total);
    for (index, raw) in raw_posts.into_iter().enumerate() {
        match Post::from_raw(raw) {
            Ok(post) => corpus.push(post),
            Err(err) => warn!(record = index, error = %err, "skipping invalid record"),
        }
    }

    if corpus.len() < total {
        tracing::info!(
            valid = corpus.len(),
            skipped = total - corpus.len(),
            "corpus loaded with skipped records"
        );
    }

    let mut analysis = AnalysisConfig::default();
    if let Some(code) = lang {
        analysis.word_frequency.language = match Language::parse(&code) {
            Some(lang) => lang,
            None => bail!("unsupported language: {code} (expected one of: en, pt)"),
        };
    }

    let bundle = analyze(&corpus, &analysis, &LexiconScorer::new())
        .await
        .context("analysis failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        print!("{}", super::render_text(&bundle));
    }

    Ok(())
}
