use anyhow::{Context, Result};
use timbre_pipeline::{load_engine, Config};

pub fn show_status(config: &Config) -> Result<()> {
    println!("\n🎧 Timbre Status\n");
    println!("  Embeddings: {}", config.embeddings_path.display());
    println!("  Metadata:   {}", config.metadata_path.display());
    println!("  Embedder:   {} ({})", config.embedder_url, config.embedder_model);

    let engine = load_engine(config).context("Failed to load the album catalog")?;

    let missing_reviews = engine
        .albums()
        .iter()
        .filter(|album| album.review.trim().is_empty())
        .count();

    println!();
    println!("  Albums: {}", engine.len());
    println!("  Embedding dimension: {}", engine.dimension());
    println!("  Zero-vector embeddings: {}", engine.zero_vector_rows());
    println!("  Albums without a review: {}", missing_reviews);

    if engine.is_empty() {
        println!("\n  The catalog is empty; every search will return no results");
    }

    Ok(())
}
