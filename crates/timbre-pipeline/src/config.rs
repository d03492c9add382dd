use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use timbre_core::DEFAULT_TOP_K;

/// Keys accepted by `timbre config get` / `timbre config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "embeddings_path",
    "metadata_path",
    "descriptors_path",
    "embedder_url",
    "embedder_model",
    "embedder_api_key",
    "embedder_timeout_secs",
    "default_top_k",
];

/// Keys whose values are written as TOML integers.
const INTEGER_KEYS: &[&str] = &["embedder_timeout_secs", "default_top_k"];

/// Configuration for timbre.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (TIMBRE_* prefix)
/// 3. Config file (~/.config/timbre/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Album embedding matrix (`.npy`, N x D).
    ///
    /// Can be set via:
    /// - CLI: --embeddings /path/to/embeddings.npy
    /// - ENV: TIMBRE_EMBEDDINGS_PATH
    /// - Config: embeddings_path = "..."
    #[serde(default = "default_embeddings_path")]
    pub embeddings_path: PathBuf,

    /// Album metadata table (CSV, N rows, same order as the matrix).
    ///
    /// Can be set via:
    /// - CLI: --metadata /path/to/embeddings_metadata.csv
    /// - ENV: TIMBRE_METADATA_PATH
    /// - Config: metadata_path = "..."
    #[serde(default = "default_metadata_path")]
    pub metadata_path: PathBuf,

    /// Descriptor vocabulary offered as query extras.
    #[serde(default = "default_descriptors_path")]
    pub descriptors_path: PathBuf,

    /// OpenAI-compatible embeddings endpoint.
    ///
    /// Must serve the same model the catalog embeddings were built with.
    #[serde(default = "default_embedder_url")]
    pub embedder_url: String,

    #[serde(default = "default_embedder_model")]
    pub embedder_model: String,

    /// Bearer token for the embeddings endpoint, if it needs one.
    pub embedder_api_key: Option<String>,

    #[serde(
        default = "default_embedder_timeout_secs",
        deserialize_with = "int_or_string"
    )]
    pub embedder_timeout_secs: u64,

    /// Number of albums returned when a search does not ask for a count.
    #[serde(default = "default_top_k", deserialize_with = "int_or_string")]
    pub default_top_k: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(u64),
    Text(String),
}

/// Environment variables reach the config as TOML strings, so integer keys
/// accept `12` and `"12"` alike.
fn int_or_string<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: TryFrom<u64> + std::str::FromStr,
    <T as TryFrom<u64>>::Error: std::fmt::Display,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    use serde::de::Error as _;

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(value) => T::try_from(value).map_err(D::Error::custom),
        IntOrString::Text(text) => text.trim().parse().map_err(D::Error::custom),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embeddings_path: default_embeddings_path(),
            metadata_path: default_metadata_path(),
            descriptors_path: default_descriptors_path(),
            embedder_url: default_embedder_url(),
            embedder_model: default_embedder_model(),
            embedder_api_key: None,
            embedder_timeout_secs: default_embedder_timeout_secs(),
            default_top_k: default_top_k(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/timbre/config.toml
    /// Reads environment variables with TIMBRE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("timbre");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration, then apply catalog paths given on the command line.
    pub fn load_with_overrides(
        embeddings_path: Option<PathBuf>,
        metadata_path: Option<PathBuf>,
    ) -> Result<Self> {
        Ok(Self::load()?.with_overrides(embeddings_path, metadata_path))
    }

    #[must_use]
    pub fn with_overrides(
        mut self,
        embeddings_path: Option<PathBuf>,
        metadata_path: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = embeddings_path {
            self.embeddings_path = path;
        }
        if let Some(path) = metadata_path {
            self.metadata_path = path;
        }
        self
    }

    /// Display value of a single key, or `None` for an unknown key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "embeddings_path" => self.embeddings_path.display().to_string(),
            "metadata_path" => self.metadata_path.display().to_string(),
            "descriptors_path" => self.descriptors_path.display().to_string(),
            "embedder_url" => self.embedder_url.clone(),
            "embedder_model" => self.embedder_model.clone(),
            "embedder_api_key" => self
                .embedder_api_key
                .clone()
                .unwrap_or_else(|| String::from("<not set>")),
            "embedder_timeout_secs" => self.embedder_timeout_secs.to_string(),
            "default_top_k" => self.default_top_k.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

fn data_file(name: &str) -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("timbre")
        .join(name)
}

fn default_embeddings_path() -> PathBuf {
    data_file("embeddings.npy")
}

fn default_metadata_path() -> PathBuf {
    data_file("embeddings_metadata.csv")
}

fn default_descriptors_path() -> PathBuf {
    data_file("music_descriptors.csv")
}

fn default_embedder_url() -> String {
    String::from("http://127.0.0.1:8080/v1/embeddings")
}

fn default_embedder_model() -> String {
    String::from("mmarkusmalone/album_moods_embedding_stage2")
}

const fn default_embedder_timeout_secs() -> u64 {
    30
}

const fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/timbre/config.toml
/// - macOS: ~/Library/Application Support/timbre/config.toml
/// - Windows: %APPDATA%\timbre\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("timbre")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Timbre Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (TIMBRE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Album catalog: an N x D embedding matrix and an N-row metadata table,
# in the same row order.
#
# Can also be set via:
# - CLI: timbre --embeddings /path/embeddings.npy --metadata /path/meta.csv search ...
# - Environment: TIMBRE_EMBEDDINGS_PATH, TIMBRE_METADATA_PATH
#
# Default: Platform-specific data directory
#embeddings_path = "/path/to/embeddings.npy"
#metadata_path = "/path/to/embeddings_metadata.csv"

# Descriptor words suggested as query extras (see `timbre descriptors`)
#descriptors_path = "/path/to/music_descriptors.csv"

# Embedding service (OpenAI-compatible /v1/embeddings endpoint)
#
# The model must be the one the catalog embeddings were built with,
# otherwise vectors will not line up (or the dimension check will fail).
embedder_url = "http://127.0.0.1:8080/v1/embeddings"
embedder_model = "mmarkusmalone/album_moods_embedding_stage2"
#embedder_api_key = "your-api-key-here"
embedder_timeout_secs = 30

# Albums returned when `--top-k` is not given (1-100)
default_top_k = 5
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

/// Set `key = value` in TOML `contents`, keeping comments and layout.
///
/// # Errors
///
/// Returns an error for an unknown key, a non-integer value for an
/// integer key, or contents that are not valid TOML.
pub fn set_value(contents: &str, key: &str, value: &str) -> Result<String> {
    if !CONFIG_KEYS.contains(&key) {
        anyhow::bail!(
            "Unknown config key: {}\n\nValid keys: {}",
            key,
            CONFIG_KEYS.join(", ")
        );
    }

    let mut doc = contents
        .parse::<toml_edit::DocumentMut>()
        .context("Config file is not valid TOML")?;

    if INTEGER_KEYS.contains(&key) {
        let number: i64 = value
            .parse()
            .with_context(|| format!("{key} must be an integer, got '{value}'"))?;
        doc[key] = toml_edit::value(number);
    } else {
        doc[key] = toml_edit::value(value);
    }

    Ok(doc.to_string())
}

/// Set a value in the config file at `path`, creating nothing.
pub fn set_config_value_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
    let updated = set_value(&contents, key, value)?;
    std::fs::write(path, updated).context("Failed to write config file")?;
    Ok(())
}

/// Set a value in the user's config file, creating it from the example first.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    ensure_config_file()?;
    set_config_value_at(&config_file_path(), key, value)
}
