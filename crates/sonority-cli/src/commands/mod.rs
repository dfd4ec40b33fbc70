pub mod config;
pub mod demo;
pub mod features;
pub mod recommend;
pub mod search;

use anyhow::{Context, Result};
use sonority_core::Dataset;
use std::path::Path;

pub use demo::run_demo;
pub use features::show_features;
pub use recommend::run_recommend;
pub use search::run_search;

/// Load the dataset, naming the path on failure.
fn open_dataset(path: &Path) -> Result<Dataset> {
    sonority_core::load_data(path)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))
}
