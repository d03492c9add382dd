use anyhow::{Context, Result};
use timbre_pipeline::config::{self, CONFIG_KEYS};
use timbre_pipeline::Config;

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    let mut shown = config.clone();
    if shown.embedder_api_key.is_some() {
        shown.embedder_api_key = Some(String::from("<redacted>"));
    }
    println!("Settings:");
    let rendered = toml::to_string_pretty(&shown).context("Failed to render configuration")?;
    for line in rendered.lines() {
        println!("  {line}");
    }

    println!("\nPriority: CLI args > ENV vars (TIMBRE_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value.
pub fn get_config(config: &Config, key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        match config.get(&key) {
            Some(value) => println!("{value}"),
            None => anyhow::bail!(
                "Unknown config key: {}\n\nValid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
    } else {
        // No key provided, show entire config file contents
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'timbre config init' to create it.");
        }
    }

    Ok(())
}

/// Set a config value.
pub fn set_config(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;

    println!("✓ Updated {} = {}", key, value);
    println!("  in {}", config::config_file_path().display());

    Ok(())
}

/// Show the config file path.
pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure timbre.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
