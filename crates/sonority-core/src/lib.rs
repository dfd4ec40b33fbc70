//! Core data model for sonority.
//!
//! This crate defines the song record, the schema-validated dataset it
//! lives in, the feature set used to compare songs, and the CSV loader
//! that produces a dataset from disk.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod dataset;
pub mod error;
pub mod model;

pub use dataset::{load_data, Dataset, Schema};
pub use error::{Error, Result};
pub use model::{select_features, FeatureSet, Song, Value, DEFAULT_FEATURES};
