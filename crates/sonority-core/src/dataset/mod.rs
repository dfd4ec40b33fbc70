//! The in-memory song table.
//!
//! A [`Dataset`] is an ordered list of [`Song`]s sharing one [`Schema`].
//! Rows are addressed by position only; the table is never mutated once
//! built.

mod loader;

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::model::value::{is_missing, Value};
use crate::model::{FeatureSet, Song};

pub use loader::load_data;

pub const TRACK_NAME: &str = "track_name";
pub const ARTIST_NAME: &str = "artist_name";
pub const POPULARITY: &str = "popularity";

/// Ordered column names with a case-sensitive name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    track_name: usize,
    artist_name: usize,
    popularity: usize,
}

impl Schema {
    /// Validate a header row.
    ///
    /// # Errors
    /// Fails on duplicate column names or when `track_name`,
    /// `artist_name` or `popularity` is absent.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::DuplicateColumn(name.clone()));
            }
        }

        let require = |name: &'static str| index.get(name).copied().ok_or(Error::MissingColumn(name));
        let track_name = require(TRACK_NAME)?;
        let artist_name = require(ARTIST_NAME)?;
        let popularity = require(POPULARITY)?;

        Ok(Self {
            columns,
            index,
            track_name,
            artist_name,
            popularity,
        })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Names from `features` that are not columns of this schema, in
    /// feature order.
    #[must_use]
    pub fn missing_features(&self, features: &FeatureSet) -> Vec<String> {
        features
            .iter()
            .filter(|name| !self.index.contains_key(*name))
            .map(String::from)
            .collect()
    }
}

/// An immutable, schema-validated table of songs.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Schema,
    songs: Vec<Song>,
}

impl Dataset {
    /// Build a dataset from a header and raw text rows.
    ///
    /// This is the same path the CSV loader takes, so it applies the same
    /// validation: rows must be as wide as the header and `popularity`
    /// must be numeric or missing.
    ///
    /// # Errors
    /// Returns a schema error for a bad header, or [`Error::RaggedRow`] /
    /// [`Error::InvalidValue`] for a malformed row.
    pub fn from_rows<C, R, F>(columns: C, rows: R) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator<Item = F>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        let schema = Schema::new(columns.into_iter().map(Into::into).collect())?;
        let mut dataset = Self::empty(schema);
        for (i, row) in rows.into_iter().enumerate() {
            let owned: Vec<F::Item> = row.into_iter().collect();
            let fields: Vec<&str> = owned.iter().map(|f| f.as_ref()).collect();
            dataset.push_row(i + 1, &fields)?;
        }
        Ok(dataset)
    }

    pub(crate) fn empty(schema: Schema) -> Self {
        Self {
            schema,
            songs: Vec::new(),
        }
    }

    /// Append one data row. `row` is 1-based and only used in errors.
    pub(crate) fn push_row(&mut self, row: usize, raw: &[&str]) -> Result<()> {
        if raw.len() != self.schema.len() {
            return Err(Error::RaggedRow {
                row,
                found: raw.len(),
                expected: self.schema.len(),
            });
        }

        let text = |i: usize| Some(raw[i]).filter(|f| !is_missing(f.trim())).map(String::from);

        let popularity = match Value::parse(raw[self.schema.popularity]) {
            Value::Missing => None,
            Value::Number(n) => Some(n),
            Value::Text(value) => {
                return Err(Error::InvalidValue {
                    row,
                    column: POPULARITY.to_string(),
                    value,
                })
            }
        };

        let song = Song::new(
            text(self.schema.track_name),
            text(self.schema.artist_name),
            popularity,
            raw.iter().map(|f| Value::parse(f)).collect(),
        );
        self.songs.push(song);
        Ok(())
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    #[must_use]
    pub fn get(&self, row: usize) -> Option<&Song> {
        self.songs.get(row)
    }

    /// The cell at (`row`, `column`), if both exist.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.schema.index_of(column)?;
        self.songs.get(row).map(|song| song.value(col))
    }

    /// Unique, non-missing track names in first-seen order.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.songs
            .iter()
            .filter_map(|song| song.track_name.as_deref())
            .filter(|title| seen.insert(*title))
            .collect()
    }

    /// Row indices whose track name contains `query`, ignoring case.
    #[must_use]
    pub fn find_by_title(&self, query: &str) -> Vec<usize> {
        let needle = query.to_lowercase();
        self.songs
            .iter()
            .enumerate()
            .filter(|(_, song)| song.title_contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}
