use serde::{Deserialize, Serialize};
use std::fmt;

/// Audio features compared when the caller does not choose any.
pub const DEFAULT_FEATURES: [&str; 9] = [
    "acousticness",
    "danceability",
    "energy",
    "instrumentalness",
    "liveness",
    "loudness",
    "speechiness",
    "tempo",
    "valence",
];

/// An ordered, duplicate-free list of feature column names.
///
/// The order fixes the layout of every feature vector built from it, so
/// two vectors are only comparable when they come from equal sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(Vec<String>);

impl FeatureSet {
    /// Build a feature set, keeping the first occurrence of each name.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref();
            if !unique.iter().any(|existing| existing == name) {
                unique.push(name.to_string());
            }
        }
        Self(unique)
    }

    /// The built-in nine-feature default.
    #[must_use]
    pub fn default_features() -> Self {
        Self::new(DEFAULT_FEATURES)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::default_features()
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Resolve the features to compare songs on.
///
/// Returns the caller's selection (deduplicated, order kept) when it is
/// present and non-empty, otherwise [`DEFAULT_FEATURES`].
pub fn select_features<S: AsRef<str>>(user_features: Option<&[S]>) -> FeatureSet {
    match user_features {
        Some(features) if !features.is_empty() => FeatureSet::new(features),
        _ => FeatureSet::default_features(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_features_default() {
        let features = select_features::<&str>(None);
        assert_eq!(features.len(), 9);
        assert_eq!(features.names()[0], "acousticness");
        assert_eq!(features.names()[8], "valence");
    }

    #[test]
    fn test_select_features_empty_falls_back() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(select_features(Some(empty.as_slice())), FeatureSet::default_features());
    }

    #[test]
    fn test_select_features_user() {
        let features = select_features(Some(&["energy", "tempo"][..]));
        assert_eq!(features.names(), ["energy", "tempo"]);
    }

    #[test]
    fn test_feature_set_dedup_keeps_first() {
        let features = FeatureSet::new(["tempo", "energy", "tempo", "valence", "energy"]);
        assert_eq!(features.names(), ["tempo", "energy", "valence"]);
        assert!(features.contains("valence"));
        assert!(!features.contains("loudness"));
    }

    #[test]
    fn test_feature_set_display() {
        let features = FeatureSet::new(["energy", "tempo"]);
        assert_eq!(features.to_string(), "energy, tempo");
    }
}
