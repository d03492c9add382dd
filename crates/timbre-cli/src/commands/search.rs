use std::fmt::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use timbre_core::{AlbumMatch, VibeQuery};
use timbre_pipeline::{load_engine, Config, HttpEmbedder, SearchError, VibeSearch};

/// Embed a vibe and print the best matching albums.
pub async fn run_search(
    config: &Config,
    vibe: String,
    extras: Vec<String>,
    top_k: usize,
    json: bool,
) -> Result<()> {
    let query = VibeQuery::new(vibe).with_extras(extras).with_top_k(top_k);

    // Reject bad input before paying for the catalog load.
    if let Err(e) = query.validate() {
        anyhow::bail!("{e}\n\nExample: timbre search dreamy nostalgic indie folk");
    }

    let engine = load_engine(config).context("Failed to load the album catalog")?;
    let embedder =
        HttpEmbedder::from_config(config).context("Failed to create embedding client")?;
    let search = VibeSearch::new(Arc::new(engine), embedder);

    let results = match search.search(&query).await {
        Ok(results) => results,
        Err(e @ SearchError::Embed(_)) => {
            return Err(e).with_context(|| {
                format!(
                    "Search failed: is the embedding service running at {}?",
                    config.embedder_url
                )
            });
        }
        Err(e) => return Err(e).context("Search failed"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        let mut listing = String::new();
        render_results(&mut listing, &query.text(), &results)?;
        print!("{listing}");
    }

    Ok(())
}

/// Write a human-readable result listing.
///
/// The review is shown with a trailing ellipsis since it is usually a
/// prefix of the full text.
pub fn render_results(
    out: &mut impl Write,
    query_text: &str,
    results: &[AlbumMatch],
) -> std::fmt::Result {
    writeln!(out, "\nTop {} results for «{}»\n", results.len(), query_text)?;

    if results.is_empty() {
        return writeln!(out, "  No results found.");
    }

    for result in results {
        writeln!(out, "{}. {} — {}", result.rank, result.artist, result.title)?;
        writeln!(
            out,
            "   {} • {} • score={:.4}",
            result.genre,
            result.year_released.as_deref().unwrap_or(""),
            result.score
        )?;
        if !result.review.is_empty() {
            writeln!(out, "   {}...", result.review)?;
        }
        writeln!(out)?;
    }

    Ok(())
}
