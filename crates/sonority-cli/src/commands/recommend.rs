use anyhow::{Context, Result};
use sonority_core::Dataset;
use sonority_search::{Recommendations, SearchError};
use std::fmt::{self, Write as _};
use std::path::Path;

use super::open_dataset;

pub fn run_recommend(
    dataset_path: &Path,
    title: &str,
    features: &[String],
    json: bool,
) -> Result<()> {
    let dataset = open_dataset(dataset_path)?;
    recommend_from(&dataset, title, features, json)
}

/// Recommend from an already loaded dataset and print the result.
///
/// An unmatched title is reported and treated as success so a caller can
/// simply try another title.
pub fn recommend_from(dataset: &Dataset, title: &str, features: &[String], json: bool) -> Result<()> {
    match sonority_search::recommend(dataset, title, Some(features)) {
        Ok(recs) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&recs).context("Failed to serialize results")?
                );
            } else {
                print!("{}", render_table(&recs)?);
            }
            Ok(())
        }
        Err(SearchError::NotFound { query }) => {
            println!(
                "No matches found for '{}'. Please check the spelling or try a different song.",
                query
            );
            Ok(())
        }
        Err(e) => Err(e).context(format!("Could not recommend songs like '{}'", title)),
    }
}

/// Lay recommendations out as a plain-text table.
fn render_table(recs: &Recommendations) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let reference = recs.target_title.as_deref().unwrap_or("<untitled>");
    writeln!(out, "Songs that sound like '{}' (row {}):\n", reference, recs.target)?;

    if recs.is_empty() {
        out.push_str("  No other songs to compare against.\n");
        return Ok(out);
    }

    let text = |v: Option<&str>| v.unwrap_or("-").to_string();
    let title_width = recs
        .iter()
        .map(|r| text(r.track_name.as_deref()).chars().count())
        .chain(std::iter::once("Track".len()))
        .max()
        .unwrap_or(0);
    let artist_width = recs
        .iter()
        .map(|r| text(r.artist_name.as_deref()).chars().count())
        .chain(std::iter::once("Artist".len()))
        .max()
        .unwrap_or(0);

    write!(
        out,
        "{:>3}  {:<tw$}  {:<aw$}  {:>10}  {:>10}",
        "#",
        "Track",
        "Artist",
        "Popularity",
        "Similarity",
        tw = title_width,
        aw = artist_width
    )?;
    for name in &recs.features {
        write!(out, "  {:>w$}", name, w = name.len().max(8))?;
    }
    out.push('\n');

    for (rank, rec) in recs.iter().enumerate() {
        let popularity = rec
            .popularity
            .map_or_else(|| String::from("-"), |p| format!("{p}"));
        write!(
            out,
            "{:>3}  {:<tw$}  {:<aw$}  {:>10}  {:>10.6}",
            rank + 1,
            text(rec.track_name.as_deref()),
            text(rec.artist_name.as_deref()),
            popularity,
            rec.similarity,
            tw = title_width,
            aw = artist_width
        )?;
        for (name, value) in recs.features.iter().zip(&rec.features) {
            let width = name.len().max(8);
            match value {
                Some(v) => {
                    write!(out, "  {:>width$.4}", v)?;
                }
                None => {
                    write!(out, "  {:>width$}", "-")?;
                }
            }
        }
        out.push('\n');
    }
    Ok(out)
}
