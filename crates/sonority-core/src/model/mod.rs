pub mod features;
pub mod song;
pub mod value;

pub use features::{select_features, FeatureSet, DEFAULT_FEATURES};
pub use song::Song;
pub use value::Value;
