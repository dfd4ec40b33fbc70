use serde::{Deserialize, Serialize};

use crate::model::value::Value;

static MISSING: Value = Value::Missing;

/// One row of the song table.
///
/// The three descriptive columns are lifted into typed fields. Every
/// column, including those three, is also kept as a raw [`Value`] in
/// schema order so features can be read by column index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub popularity: Option<f64>,
    values: Vec<Value>,
}

impl Song {
    pub(crate) fn new(
        track_name: Option<String>,
        artist_name: Option<String>,
        popularity: Option<f64>,
        values: Vec<Value>,
    ) -> Self {
        Self {
            track_name,
            artist_name,
            popularity,
            values,
        }
    }

    /// The cell at `column`, or [`Value::Missing`] past the end of the row.
    #[must_use]
    pub fn value(&self, column: usize) -> &Value {
        self.values.get(column).unwrap_or(&MISSING)
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Case-insensitive substring test against the track name.
    ///
    /// Songs without a title never match, not even the empty query.
    #[must_use]
    pub fn title_contains(&self, needle_lower: &str) -> bool {
        self.track_name
            .as_deref()
            .is_some_and(|title| title.to_lowercase().contains(needle_lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: Option<&str>) -> Song {
        Song::new(
            title.map(String::from),
            Some("Ed Sheeran".to_string()),
            Some(80.0),
            vec![Value::Number(0.5)],
        )
    }

    #[test]
    fn test_title_contains() {
        let s = song(Some("Shape of You"));
        assert!(s.title_contains("shape"));
        assert!(s.title_contains("of you"));
        assert!(!s.title_contains("shape of me"));
    }

    #[test]
    fn test_missing_title_never_matches() {
        let s = song(None);
        assert!(!s.title_contains(""));
    }

    #[test]
    fn test_value_out_of_range_is_missing() {
        let s = song(Some("x"));
        assert_eq!(s.value(0), &Value::Number(0.5));
        assert_eq!(s.value(7), &Value::Missing);
    }
}
