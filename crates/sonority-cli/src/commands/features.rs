use sonority_core::{select_features, FeatureSet};

use crate::config::Config;

/// Print the built-in feature set and the one actually in effect.
pub fn show_features(config: &Config) {
    println!("Default features:");
    for name in &FeatureSet::default_features() {
        println!("  {}", name);
    }

    if config.features.is_empty() {
        println!("\nNo features configured; the defaults are in effect.");
    } else {
        let effective = select_features(Some(config.features.as_slice()));
        println!("\nConfigured features: {}", effective);
    }
}
