use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for sonority.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SONORITY_* prefix)
/// 3. Config file (~/.config/sonority/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the songs CSV.
    ///
    /// Can be set via:
    /// - CLI: --data /path/to/songs.csv
    /// - ENV: SONORITY_DATASET_PATH
    /// - Config: dataset_path = "/path/to/songs.csv"
    pub dataset_path: PathBuf,

    /// Feature columns to compare songs on. Empty means the built-in
    /// nine audio features.
    pub features: Vec<String>,

    /// How many titles `search` prints.
    pub search_limit: usize,

    pub logging: LoggingConfig,
}

/// Logger settings handed to twyg.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub coloured: bool,
    pub report_caller: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            features: Vec::new(),
            search_limit: sonority_search::DEFAULT_SEARCH_LIMIT,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            coloured: true,
            report_caller: false,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/sonority/config.toml
    /// Reads environment variables with SONORITY_ prefix.
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

        let env_opts = env::Options::with_top_level("sonority");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Apply CLI overrides on top of the loaded configuration.
    #[must_use]
    pub fn with_overrides(mut self, dataset_path: Option<PathBuf>, log_level: Option<String>) -> Self {
        if let Some(path) = dataset_path {
            self.dataset_path = path;
        }
        if let Some(level) = log_level {
            self.logging.level = level;
        }
        self
    }
}

/// The dataset path used when nothing else is configured, relative to
/// the working directory.
fn default_dataset_path() -> PathBuf {
    PathBuf::from("data").join("SpotifyAudioFeaturesApril2019.csv")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/sonority/config.toml
/// - macOS: ~/Library/Application Support/sonority/config.toml
/// - Windows: %APPDATA%\sonority\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sonority")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Sonority Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SONORITY_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the songs CSV. Needs track_name, artist_name and popularity
# columns plus one numeric column per audio feature.
#
# Can also be set via:
# - CLI: sonority --data /path/to/songs.csv recommend "Hello"
# - Environment: SONORITY_DATASET_PATH=/path/to/songs.csv
dataset_path = "data/SpotifyAudioFeaturesApril2019.csv"

# Feature columns used for similarity. Leave empty for the default:
# acousticness, danceability, energy, instrumentalness, liveness,
# loudness, speechiness, tempo, valence
features = []

# Number of titles printed by `sonority search`
search_limit = 5

[logging]
# One of: trace, debug, info, warn, error
level = "info"
coloured = true
report_caller = false
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
