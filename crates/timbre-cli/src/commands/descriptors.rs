use anyhow::{Context, Result};
use timbre_pipeline::{load_descriptors, Config};

/// Print descriptor words that can be passed to `timbre search --extra`.
pub fn show_descriptors(config: &Config, limit: usize) -> Result<()> {
    let path = &config.descriptors_path;

    if !path.exists() {
        println!("No descriptor vocabulary found at {}", path.display());
        println!("\nSet descriptors_path with 'timbre config set descriptors_path <file>'");
        return Ok(());
    }

    let descriptors = load_descriptors(path)
        .with_context(|| format!("Failed to load descriptors from {}", path.display()))?;

    if descriptors.is_empty() {
        println!("No descriptors in {}", path.display());
        return Ok(());
    }

    let shown = descriptors.len().min(limit);
    println!("{}", descriptors[..shown].join(", "));
    println!(
        "\n{} of {} descriptors. Add them to a search with --extra <word>.",
        shown,
        descriptors.len()
    );

    Ok(())
}
