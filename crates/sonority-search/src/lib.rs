//! Title search and sound-alike ranking for sonority.
//!
//! [`search_songs`] finds titles close to a misspelt query, and
//! [`recommend`] ranks the songs whose audio features point in the same
//! direction as a chosen song.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod ranker;
pub mod sequence;
pub mod title;
pub mod vector;

pub use error::{SearchError, SearchResult};
pub use ranker::{recommend, Recommendation, Recommendations, Recommender, RECOMMENDATION_COUNT};
pub use sequence::{sequence_ratio, SequenceMatcher};
pub use title::{close_matches, search_songs, TitleMatch, DEFAULT_SEARCH_LIMIT, SEARCH_CUTOFF};
pub use vector::FeatureMatrix;
