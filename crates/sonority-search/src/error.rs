//! Recommendation error types.

use thiserror::Error;

/// Reasons a recommendation request can fail.
///
/// All of these are reported to the caller as values; none of them
/// should end the process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// No song title contains the query.
    #[error("no song title contains {query:?}")]
    NotFound { query: String },

    /// One or more requested features are not dataset columns.
    #[error("unknown feature(s): {}", .missing.join(", "))]
    InvalidFeatureSet { missing: Vec<String> },

    /// The feature data could not be turned into vectors.
    #[error("similarity computation failed: {0}")]
    Computation(String),
}

impl SearchError {
    /// Returns `true` when the query matched no title, so asking again
    /// with a different title may succeed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when the requested features do not fit the dataset.
    pub fn is_invalid_feature_set(&self) -> bool {
        matches!(self, Self::InvalidFeatureSet { .. })
    }
}

/// Convenience alias for recommendation results.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
