use thiserror::Error;

/// Errors raised while reading a dataset.
///
/// Every variant is a resource failure: the input could not be read or
/// does not have the shape of a song table.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("invalid value {value:?} in column {column} at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

impl Error {
    /// Returns `true` when the input could not be read or parsed at all,
    /// as opposed to being readable but not shaped like a song table.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Csv(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
