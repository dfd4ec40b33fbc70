//! End-to-end tests: load a CSV from disk, search titles, recommend.

use std::io::Write;

use sonority_core::{load_data, Dataset, FeatureSet, DEFAULT_FEATURES};
use sonority_search::{recommend, search_songs, Recommender, SearchError, RECOMMENDATION_COUNT};
use tempfile::NamedTempFile;

/// Write a Spotify-style CSV with `titles.len()` songs and return its file.
///
/// Feature values are spread deterministically so no two songs share a
/// direction.
fn write_catalog(titles: &[&str]) -> NamedTempFile {
    let mut csv = String::from("artist_name,track_id,track_name");
    for feature in DEFAULT_FEATURES {
        csv.push(',');
        csv.push_str(feature);
    }
    csv.push_str(",duration_ms,popularity\n");

    for (i, title) in titles.iter().enumerate() {
        let x = i as f64 + 1.0;
        let values = [
            (x * 0.37).sin().abs(),
            (x * 0.11).cos().abs(),
            (x * 0.53).sin().abs(),
            (x * 0.07) % 1.0,
            (x * 0.29).cos().abs(),
            -3.0 - (x * 0.71).sin().abs() * 20.0,
            (x * 0.13) % 0.5,
            80.0 + (x * 7.0) % 90.0,
            (x * 0.41).sin().abs(),
        ];
        let cells: Vec<String> = values.iter().map(f64::to_string).collect();
        csv.push_str(&format!(
            "Artist {i},id{i},{title},{},{},{}\n",
            cells.join(","),
            200_000 + i * 1_000,
            (i * 7) % 100
        ));
    }

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(csv.as_bytes()).unwrap();
    file
}

fn catalog() -> Dataset {
    let mut titles = vec!["Shape of You", "Shape of Me"];
    let others: Vec<String> = (0..20).map(|i| format!("Track Number {i}")).collect();
    titles.extend(others.iter().map(String::as_str));
    let file = write_catalog(&titles);
    load_data(file.path()).unwrap()
}

#[test]
fn test_shape_of_you_scenario() {
    let ds = catalog();
    assert_eq!(ds.len(), 22);

    let recs = recommend::<&str>(&ds, "Shape of You", None).unwrap();
    assert_eq!(recs.target, 0);
    assert_eq!(recs.len(), RECOMMENDATION_COUNT);
    assert!(recs.iter().all(|r| r.row != 0));
    assert!(recs
        .iter()
        .all(|r| r.track_name.as_deref() != Some("Shape of You")));
    assert_eq!(recs.features, FeatureSet::default_features());
    assert!(recs.iter().all(|r| r.features.len() == DEFAULT_FEATURES.len()));
}

#[test]
fn test_scores_are_non_increasing() {
    let ds = catalog();
    let recs = recommend::<&str>(&ds, "shape of me", None).unwrap();
    assert_eq!(recs.target, 1);
    for pair in recs.items.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    assert!(recs.iter().all(|r| r.similarity <= 1.0 + 1e-9));
}

#[test]
fn test_recommend_is_idempotent() {
    let ds = catalog();
    let first = recommend::<&str>(&ds, "Track Number 3", None).unwrap();
    let second = recommend::<&str>(&ds, "Track Number 3", None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_self_similarity_is_one() {
    let ds = catalog();
    let mut ranker = Recommender::new(&ds);
    let scores = ranker.scores(5, &FeatureSet::default_features()).unwrap();
    assert_eq!(scores.len(), ds.len());
    assert!((scores[5] - 1.0).abs() < 1e-9);
    assert!(scores.iter().all(|s| *s <= scores[5] + 1e-9));
}

#[test]
fn test_feature_set_changes_scores_not_cardinality() {
    let ds = catalog();
    let all = recommend::<&str>(&ds, "Shape of You", None).unwrap();
    let some = recommend(&ds, "Shape of You", Some(&["energy", "tempo", "valence"][..])).unwrap();

    assert_eq!(all.len(), some.len());
    assert!(some.len() <= RECOMMENDATION_COUNT);
    let all_scores: Vec<f64> = all.iter().map(|r| r.similarity).collect();
    let some_scores: Vec<f64> = some.iter().map(|r| r.similarity).collect();
    assert_ne!(all_scores, some_scores);
}

#[test]
fn test_unknown_feature_is_reported() {
    let ds = catalog();
    let err = recommend(&ds, "Shape of You", Some(&["nonexistent_feature"][..])).unwrap_err();
    assert!(matches!(err, SearchError::InvalidFeatureSet { ref missing } if missing == &["nonexistent_feature"]));
}

#[test]
fn test_single_song_dataset_is_empty() {
    let file = write_catalog(&["Shape of You"]);
    let ds = load_data(file.path()).unwrap();
    let recs = recommend::<&str>(&ds, "Shape of You", None).unwrap();
    assert!(recs.is_empty());
}

#[test]
fn test_small_dataset_returns_everything_else() {
    let file = write_catalog(&["One", "Two", "Three", "Four"]);
    let ds = load_data(file.path()).unwrap();
    let recs = recommend::<&str>(&ds, "two", None).unwrap();
    assert_eq!(recs.len(), 3);
}

#[test]
fn test_search_then_recommend() {
    let ds = catalog();
    let matches = search_songs(&ds, "Shape of You", 5);
    assert_eq!(matches.first().map(String::as_str), Some("Shape of You"));
    assert!(matches.contains(&"Shape of Me".to_string()));

    let recs = recommend::<&str>(&ds, &matches[0], None).unwrap();
    assert_eq!(recs.target_title.as_deref(), Some("Shape of You"));
}

#[test]
fn test_search_nonsense_is_empty() {
    let ds = catalog();
    assert!(search_songs(&ds, "zzqqxxjj", 5).is_empty());
}

#[test]
fn test_unmatched_title_is_not_found() {
    let ds = catalog();
    let err = recommend::<&str>(&ds, "Bohemian Rhapsody", None).unwrap_err();
    assert!(err.is_not_found());
}
