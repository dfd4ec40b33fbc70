use anyhow::Result;
use std::path::Path;

use super::open_dataset;

pub fn run_search(dataset_path: &Path, query: &str, limit: usize) -> Result<()> {
    let dataset = open_dataset(dataset_path)?;
    let matches = sonority_search::search_songs(&dataset, query, limit);

    if matches.is_empty() {
        println!("No titles look like '{}'.", query);
        return Ok(());
    }

    println!("Song matches for '{}':", query);
    for (i, title) in matches.iter().enumerate() {
        println!("  {}. {}", i + 1, title);
    }
    Ok(())
}
