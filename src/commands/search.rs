//! `search` subcommand: fetch posts for a hashtag and analyze them

use crate::analytics::LexiconScorer;
use crate::config::Config;
use crate::fetcher::{SearchClient, SearchQuery};
use crate::models::Language;
use crate::pipeline::{analyze, AnalysisConfig};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Fetch recent posts for `hashtag` and print the analysis
#[allow(clippy::too_many_arguments)]
pub async fn search(
    hashtag: String,
    max_results: Option<u32>,
    n_days: Option<i64>,
    lang: Option<String>,
    metric: Option<String>,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    let language = match lang {
        Some(code) => match Language::parse(&code) {
            Some(lang) => Some(lang),
            None => bail!("unsupported language: {code} (expected one of: en, pt)"),
        },
        None => config.search.language,
    };

    let query = SearchQuery {
        hashtag,
        language,
        max_results: max_results.unwrap_or(config.search.max_results),
        n_days: n_days.unwrap_or(config.search.n_days),
    };

    let client = SearchClient::new(&config.api).context("failed to create search client")?;
    let corpus = client
        .search_recent(&query)
        .await
        .context("recent search failed")?;

    tracing::info!(fetched = corpus.len(), expression = %query.expression(), "fetched corpus");

    let mut analysis = AnalysisConfig::default();
    if let Some(lang) = language {
        analysis.word_frequency.language = lang;
    }
    if let Some(name) = metric {
        analysis.engagement.metric = match crate::analytics::EngagementMetric::parse(&name) {
            Some(metric) => metric,
            None => bail!("unknown metric: {name} (expected likes, reposts or combined)"),
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
