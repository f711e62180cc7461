//! CLI subcommand implementations

pub mod analyze;
pub mod search;

pub use analyze::analyze_file;
pub use search::search;

use crate::pipeline::{AnalysisBundle, Section};
use std::fmt::{self, Write};

/// Render a bundle as a plain-text report
#[must_use]
pub fn render_text(bundle: &AnalysisBundle) -> String {
    let mut out = String::new();
    // fmt::Write into a String is infallible.
    let _ = write_report(&mut out, bundle);
    out
}

fn write_report(out: &mut String, bundle: &AnalysisBundle) -> fmt::Result {
    writeln!(out, "Corpus size: {} posts", bundle.corpus_size)?;

    writeln!(out, "\nTop words used:")?;
    match &bundle.word_frequency {
        Section::Available(entries) if entries.is_empty() => {
            writeln!(out, "  (none)")?;
        }
        Section::Available(entries) => {
            for entry in entries {
                writeln!(out, "  {:>5}  {}", entry.count, entry.word)?;
            }
        }
        Section::Unavailable { reason } => {
            writeln!(out, "  unavailable: {reason}")?;
        }
    }

    writeln!(out, "\nPosts by location:")?;
    match &bundle.locations {
        Section::Available(buckets) if buckets.is_empty() => {
            writeln!(out, "  (none)")?;
        }
        Section::Available(buckets) => {
            for bucket in buckets {
                writeln!(out, "  {:>5}  {}", bucket.count, bucket.location)?;
            }
        }
        Section::Unavailable { reason } => {
            writeln!(out, "  unavailable: {reason}")?;
        }
    }

    writeln!(out, "\nMost engaged posts:")?;
    match &bundle.engagement {
        Section::Available(posts) if posts.is_empty() => {
            writeln!(out, "  (none)")?;
        }
        Section::Available(posts) => {
            for post in posts {
                writeln!(
                    out,
                    "  @{} ({} likes, {} reposts): {}",
                    post.author_handle,
                    post.like_count,
                    post.repost_count,
                    preview(&post.text)
                )?;
            }
        }
        Section::Unavailable { reason } => {
            writeln!(out, "  unavailable: {reason}")?;
        }
    }

    writeln!(out, "\nSentiment extremes:")?;
    match &bundle.sentiment {
        Section::Available(report) => {
            writeln!(out, "  most positive:")?;
            for post in &report.most_positive {
                writeln!(out, "    @{}: {}", post.author_handle, preview(&post.text))?;
            }
            writeln!(out, "  most negative:")?;
            for post in &report.most_negative {
                writeln!(out, "    @{}: {}", post.author_handle, preview(&post.text))?;
            }
            if !report.unscored.is_empty() {
                writeln!(out, "  unscored: {} posts", report.unscored.len())?;
            }
        }
        Section::Unavailable { reason } => {
            writeln!(out, "  unavailable: {reason}")?;
        }
    }

    writeln!(out, "\nVerified posts:")?;
    match &bundle.verified {
        Section::Available(posts) if posts.is_empty() => {
            writeln!(out, "  (none)")?;
        }
        Section::Available(posts) => {
            for post in posts {
                writeln!(out, "  @{}: {}", post.author_handle, preview(&post.text))?;
            }
        }
        Section::Unavailable { reason } => {
            writeln!(out, "  unavailable: {reason}")?;
        }
    }

    writeln!(out, "\nPosts by author:")?;
    match &bundle.authors {
        Section::Available(authors) if authors.is_empty() => {
            writeln!(out, "  (none)")?;
        }
        Section::Available(authors) => {
            for author in authors {
                let marker = if author.verified { " [verified]" } else { "" };
                writeln!(out, "  {:>5}  @{}{}", author.post_count, author.handle, marker)?;
            }
        }
        Section::Unavailable { reason } => {
            writeln!(out, "  unavailable: {reason}")?;
        }
    }

    Ok(())
}

/// One-line preview of a post text
fn preview(text: &str) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() > 80 {
        let truncated: String = flat.chars().take(77).collect();
        format!("{truncated}...")
    } else {
        flat
    }
}
