use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::dataset::{Dataset, Schema};
use crate::error::Result;

/// Load a song table from a CSV file with a header row.
///
/// # Errors
/// Fails when the file cannot be opened, the CSV is malformed (including
/// rows whose width differs from the header), or the header lacks a
/// required column.
pub fn load_data(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    log::debug!("Loading dataset from {}", path.display());
    let file = File::open(path)?;
    let dataset = Dataset::from_reader(file)?;
    log::info!(
        "Loaded {} songs with {} columns from {}",
        dataset.len(),
        dataset.schema().len(),
        path.display()
    );
    Ok(dataset)
}

impl Dataset {
    /// Read a song table from any CSV source.
    ///
    /// # Errors
    /// Same conditions as [`load_data`], minus opening the file.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
        let mut dataset = Self::empty(Schema::new(columns)?);

        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let fields: Vec<&str> = record.iter().collect();
            dataset.push_row(i + 1, &fields)?;
        }

        Ok(dataset)
    }
}
