use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "sonority", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the songs CSV (default: data/SpotifyAudioFeaturesApril2019.csv)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Find titles that look like a (possibly misspelt) song name
    ///
    /// Compares the query against every distinct track name in the
    /// dataset and prints those at least 30% similar, best first.
    Search {
        /// The song name to look for
        query: String,

        /// Maximum number of titles to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Recommend songs that sound like a given song
    ///
    /// The first song whose title contains TITLE (ignoring case) is the
    /// reference. Every song's audio features are scaled to unit length
    /// and ranked by cosine similarity to the reference; the ten closest
    /// other songs are printed.
    ///
    /// Feature columns default to acousticness, danceability, energy,
    /// instrumentalness, liveness, loudness, speechiness, tempo and
    /// valence. Use --feature (repeatable) or the `features` config key to
    /// choose others.
    Recommend {
        /// Title, or part of a title, of the reference song
        title: String,

        /// Feature column to compare on (repeatable)
        #[arg(short = 'f', long = "feature")]
        features: Vec<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Search for a title, then recommend from the best match
    Demo {
        /// Title to search for
        #[arg(long, default_value = "Shape of You")]
        title: String,
    },
    /// Show the features used for similarity
    Features,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
    /// Print an example config file
    Example,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?.with_overrides(cli.data, cli.log_level);
    logging::init(&config.logging)?;

    match cli.command {
        Commands::Search { query, limit } => {
            let limit = limit.unwrap_or(config.search_limit);
            commands::run_search(&config.dataset_path, &query, limit)?;
        }
        Commands::Recommend {
            title,
            features,
            json,
        } => {
            // CLI features win over configured ones
            let features = if features.is_empty() {
                config.features.clone()
            } else {
                features
            };
            commands::run_recommend(&config.dataset_path, &title, &features, json)?;
        }
        Commands::Demo { title } => {
            commands::run_demo(&config, &title)?;
        }
        Commands::Features => {
            commands::show_features(&config);
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show_config(&config),
            ConfigCommands::Path => commands::config::show_path(),
            ConfigCommands::Init => commands::config::init_config()?,
            ConfigCommands::Example => commands::config::show_example(),
        },
    }

    Ok(())
}
