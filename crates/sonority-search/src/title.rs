//! Fuzzy title search.

use sonority_core::Dataset;

use crate::sequence::SequenceMatcher;

/// Minimum similarity ratio for a title to count as a match.
pub const SEARCH_CUTOFF: f64 = 0.3;

/// Number of titles returned when the caller does not say.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// A candidate title and its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    pub title: String,
    pub score: f64,
}

/// Rank `candidates` by similarity to `query`.
///
/// Candidates scoring at least `cutoff` are returned best first; equal
/// scores are ordered by title, descending. At most `limit` matches are
/// returned, so a zero limit yields nothing.
pub fn close_matches<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    limit: usize,
    cutoff: f64,
) -> Vec<TitleMatch> {
    if limit == 0 {
        return Vec::new();
    }

    let matcher = SequenceMatcher::new(query);
    let mut matches: Vec<TitleMatch> = candidates
        .iter()
        .map(|c| c.as_ref())
        .filter(|title| {
            matcher.real_quick_ratio(title) >= cutoff && matcher.quick_ratio(title) >= cutoff
        })
        .filter_map(|title| {
            let score = matcher.ratio(title);
            (score >= cutoff).then(|| TitleMatch {
                title: title.to_string(),
                score,
            })
        })
        .collect();

    matches.sort_by(|x, y| {
        y.score
            .total_cmp(&x.score)
            .then_with(|| y.title.cmp(&x.title))
    });
    matches.truncate(limit);
    matches
}

/// Titles in `dataset` that look like `query`, best first.
///
/// Each distinct non-missing track name is considered once. An
/// unmatched query gives an empty list rather than an error.
pub fn search_songs(dataset: &Dataset, query: &str, limit: usize) -> Vec<String> {
    let titles = dataset.titles();
    let matches = close_matches(query, &titles, limit, SEARCH_CUTOFF);
    log::debug!(
        "Title search for {:?}: {} of {} titles matched",
        query,
        matches.len(),
        titles.len()
    );
    matches.into_iter().map(|m| m.title).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(titles: &[&str]) -> Dataset {
        Dataset::from_rows(
            ["track_name", "artist_name", "popularity"],
            titles.iter().map(|t| [*t, "Someone", "50"]),
        )
        .unwrap()
    }

    #[test]
    fn test_close_matches_order_and_cutoff() {
        let candidates = ["ape", "apple", "peach", "puppy"];
        let matches = close_matches("appel", &candidates, 3, 0.6);
        let titles: Vec<&str> = matches.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["apple", "ape"]);
        assert!((matches[0].score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_close_matches_ties_order_by_title_descending() {
        let candidates = ["ab", "ba"];
        let matches = close_matches("a", &candidates, 5, 0.3);
        let titles: Vec<&str> = matches.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["ba", "ab"]);
    }

    #[test]
    fn test_close_matches_zero_limit() {
        assert!(close_matches("ape", &["ape"], 0, 0.0).is_empty());
    }

    #[test]
    fn test_search_songs_typo() {
        let ds = dataset(&["Shape of You", "Hello", "Shape of My Heart", "Thriller"]);
        let results = search_songs(&ds, "Shap of You", DEFAULT_SEARCH_LIMIT);
        assert_eq!(results.first().map(String::as_str), Some("Shape of You"));
        assert!(!results.contains(&"Thriller".to_string()));
    }

    #[test]
    fn test_search_songs_limit() {
        let ds = dataset(&["Hello", "Hello!", "Hello?", "Hellos", "Jello", "Yellow"]);
        assert_eq!(search_songs(&ds, "Hello", 2).len(), 2);
    }

    #[test]
    fn test_search_songs_duplicates_reported_once() {
        let ds = dataset(&["Hello", "Hello", "Hello"]);
        assert_eq!(search_songs(&ds, "Hello", 5), ["Hello"]);
    }

    #[test]
    fn test_search_songs_nonsense_is_empty() {
        let ds = dataset(&["Shape of You", "Hello"]);
        assert!(search_songs(&ds, "qzxqzxqzxqzxqzx", 5).is_empty());
        assert!(search_songs(&ds, "", 5).is_empty());
    }
}
