use anyhow::Result;

use super::open_dataset;
use super::recommend::recommend_from;
use crate::config::Config;

/// Search for `title`, then recommend from the best-matching song.
pub fn run_demo(config: &Config, title: &str) -> Result<()> {
    let dataset = open_dataset(&config.dataset_path)?;

    let matches = sonority_search::search_songs(&dataset, title, config.search_limit);
    println!("Song matches: {:?}\n", matches);

    let Some(selected) = matches.first() else {
        println!("Nothing looks like '{}'; try another title.", title);
        return Ok(());
    };

    log::info!("Recommending from first match: {}", selected);
    recommend_from(&dataset, selected, &config.features, false)
}
