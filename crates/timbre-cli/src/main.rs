use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use timbre_pipeline::{Config, DISPLAY_DESCRIPTORS};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "timbre", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the album embedding matrix (.npy)
    #[arg(long, global = true)]
    embeddings: Option<PathBuf>,

    /// Path to the album metadata table (.csv)
    #[arg(long, global = true)]
    metadata: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Find albums that match a vibe
    ///
    /// Describe a mood, a genre, a setting, or any mix of adjectives, and
    /// timbre returns the albums whose reviews sit closest to it:
    ///
    ///   timbre search dreamy nostalgic indie folk
    ///   timbre search "late night drive" --extra synthwave --extra neon -k 10
    ///
    /// The query text (plus any --extra descriptors) is embedded by the
    /// configured embedding service and compared against every album in
    /// the catalog by cosine similarity. Results are ranked best first;
    /// albums with equal scores keep catalog order.
    ///
    /// Use `timbre descriptors` for words that work well as extras.
    Search {
        /// The vibe to search for
        vibe: Vec<String>,

        /// Extra descriptor to add to the vibe (repeatable)
        #[arg(long = "extra", short = 'e')]
        extras: Vec<String>,

        /// Number of albums to return, 1-100 (default: from config)
        #[arg(long, short = 'k')]
        top_k: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show catalog status
    Status,
    /// List descriptor words to use as search extras
    Descriptors {
        /// Number of descriptors to show
        #[arg(long, default_value_t = DISPLAY_DESCRIPTORS)]
        limit: usize,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the current effective configuration
    Show,
    /// Print one value, or the whole config file when no key is given
    Get { key: Option<String> },
    /// Set a value in the config file
    Set { key: String, value: String },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load_with_overrides(cli.embeddings, cli.metadata)?;

    match cli.command {
        Commands::Search {
            vibe,
            extras,
            top_k,
            json,
        } => {
            let top_k = top_k.unwrap_or(config.default_top_k);
            commands::run_search(&config, vibe.join(" "), extras, top_k, json).await?;
        }
        Commands::Status => {
            commands::show_status(&config)?;
        }
        Commands::Descriptors { limit } => {
            commands::show_descriptors(&config, limit)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Get { key } => commands::config::get_config(&config, key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(&key, &value)?,
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
