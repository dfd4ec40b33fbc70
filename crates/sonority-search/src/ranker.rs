//! Sound-alike ranking.
//!
//! Each song becomes a vector of its selected audio features, scaled to
//! unit length. Songs are then ranked by cosine similarity to the first
//! song whose title contains the query, and the best matches other than
//! that song are returned.

use serde::Serialize;

use sonority_core::{select_features, Dataset, FeatureSet, Value};

use crate::error::{SearchError, SearchResult};
use crate::vector::FeatureMatrix;

/// How many recommendations a query yields at most.
pub const RECOMMENDATION_COUNT: usize = 10;

/// One recommended song.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Position of the song in the dataset.
    pub row: usize,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub popularity: Option<f64>,
    /// Raw feature values, in the order of [`Recommendations::features`].
    pub features: Vec<Option<f64>>,
    /// Cosine similarity to the target song.
    pub similarity: f64,
}

/// The outcome of a successful [`recommend`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    /// Row of the song the recommendations are based on.
    pub target: usize,
    pub target_title: Option<String>,
    pub features: FeatureSet,
    pub items: Vec<Recommendation>,
}

impl Recommendations {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.items.iter()
    }
}

/// Recommend songs that sound like the first title containing `query`.
///
/// `features` selects the columns to compare on; `None` or an empty slice
/// means the default audio features. See [`Recommender::recommend`].
///
/// # Errors
/// [`SearchError::NotFound`] when no title contains `query`,
/// [`SearchError::InvalidFeatureSet`] when a feature is not a column, and
/// [`SearchError::Computation`] when a feature column holds text or
/// non-finite numbers.
pub fn recommend<S: AsRef<str>>(
    dataset: &Dataset,
    query: &str,
    features: Option<&[S]>,
) -> SearchResult<Recommendations> {
    Recommender::new(dataset).recommend(query, features)
}

/// A ranker bound to one dataset.
///
/// The normalized feature matrix is kept between calls and rebuilt only
/// when a call uses a different feature set.
#[derive(Debug)]
pub struct Recommender<'a> {
    dataset: &'a Dataset,
    cache: Option<(FeatureSet, FeatureMatrix)>,
}

impl<'a> Recommender<'a> {
    #[must_use]
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            cache: None,
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Rank songs by similarity to the first title containing `query`.
    ///
    /// The title match ignores case; when several songs match, the one
    /// earliest in the dataset is the target. The target itself is never
    /// part of the result, which holds at most [`RECOMMENDATION_COUNT`]
    /// songs in descending similarity, ties in dataset order.
    ///
    /// # Errors
    /// See [`recommend`].
    pub fn recommend<S: AsRef<str>>(
        &mut self,
        query: &str,
        features: Option<&[S]>,
    ) -> SearchResult<Recommendations> {
        let dataset = self.dataset;

        let Some(&target) = dataset.find_by_title(query).first() else {
            log::info!("No song title contains {:?}", query);
            return Err(SearchError::NotFound {
                query: query.to_string(),
            });
        };

        let features = resolve_features(dataset, features)?;
        let scores = self.scores(target, &features)?;

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&x, &y| scores[y].total_cmp(&scores[x]));

        let items = order
            .into_iter()
            .filter(|&row| row != target)
            .take(RECOMMENDATION_COUNT)
            .filter_map(|row| project(dataset, &features, row, scores[row]))
            .collect();

        let target_title = dataset.get(target).and_then(|s| s.track_name.clone());
        log::debug!(
            "Ranked {} songs against row {} ({:?}) on [{}]",
            scores.len(),
            target,
            target_title,
            features
        );

        Ok(Recommendations {
            target,
            target_title,
            features,
            items,
        })
    }

    /// Cosine similarity of row `target` to every row, in dataset order.
    ///
    /// # Errors
    /// [`SearchError::InvalidFeatureSet`] for unknown columns,
    /// [`SearchError::Computation`] for unusable data or an out-of-range
    /// target.
    pub fn scores(&mut self, target: usize, features: &FeatureSet) -> SearchResult<Vec<f64>> {
        let songs = self.dataset.len();
        self.normalized(features)?
            .similarities(target)
            .ok_or_else(|| {
                SearchError::Computation(format!(
                    "row {target} is outside a dataset of {songs} songs"
                ))
            })
    }

    fn normalized(&mut self, features: &FeatureSet) -> SearchResult<&FeatureMatrix> {
        let matrix = match self.cache.take() {
            Some((cached, matrix)) if cached == *features => matrix,
            _ => {
                log::debug!("Building feature matrix for [{}]", features);
                feature_matrix(self.dataset, features)?.normalized()
            }
        };
        Ok(&self.cache.insert((features.clone(), matrix)).1)
    }
}

/// The effective feature set, checked against the dataset's columns.
fn resolve_features<S: AsRef<str>>(
    dataset: &Dataset,
    features: Option<&[S]>,
) -> SearchResult<FeatureSet> {
    let features = select_features(features);
    let missing = dataset.schema().missing_features(&features);
    if missing.is_empty() {
        Ok(features)
    } else {
        log::warn!("Rejecting unknown feature(s): {}", missing.join(", "));
        Err(SearchError::InvalidFeatureSet { missing })
    }
}

/// Raw feature vectors for every song.
///
/// Missing cells count as zero. Text or non-finite numbers are errors.
fn feature_matrix(dataset: &Dataset, features: &FeatureSet) -> SearchResult<FeatureMatrix> {
    let columns = features
        .iter()
        .map(|name| {
            dataset
                .schema()
                .index_of(name)
                .ok_or_else(|| SearchError::InvalidFeatureSet {
                    missing: vec![name.to_string()],
                })
        })
        .collect::<SearchResult<Vec<usize>>>()?;

    let mut matrix = FeatureMatrix::with_capacity(columns.len(), dataset.len());
    let mut row_buf = vec![0.0; columns.len()];
    let mut missing = 0usize;

    for (row, song) in dataset.songs().iter().enumerate() {
        for ((slot, &column), name) in row_buf.iter_mut().zip(&columns).zip(features.iter()) {
            *slot = match song.value(column) {
                Value::Number(n) if n.is_finite() => *n,
                Value::Missing => {
                    missing += 1;
                    0.0
                }
                Value::Number(n) => {
                    return Err(SearchError::Computation(format!(
                        "non-finite value {n} in column {name} at row {row}"
                    )))
                }
                Value::Text(text) => {
                    return Err(SearchError::Computation(format!(
                        "non-numeric value {text:?} in column {name} at row {row}"
                    )))
                }
            };
        }
        matrix.push_row(&row_buf);
    }

    if missing > 0 {
        log::warn!("{} missing feature values treated as zero", missing);
    }
    Ok(matrix)
}

fn project(
    dataset: &Dataset,
    features: &FeatureSet,
    row: usize,
    similarity: f64,
) -> Option<Recommendation> {
    let song = dataset.get(row)?;
    let schema = dataset.schema();
    let values = features
        .iter()
        .map(|name| schema.index_of(name).and_then(|col| song.value(col).as_f64()))
        .collect();

    Some(Recommendation {
        row,
        track_name: song.track_name.clone(),
        artist_name: song.artist_name.clone(),
        popularity: song.popularity,
        features: values,
        similarity,
    })
}
