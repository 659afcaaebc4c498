use crate::error::{AnalysisError, Result};
use crate::perf::{ThreadResult, ThresholdResult};
use log::info;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn load_thread_results(path: &Path) -> Result<Vec<ThreadResult>> {
    let file = File::open(path).map_err(|e| AnalysisError::io(e, path))?;
    let rows = read_thread_results(file, path)?;
    info!("loaded {} thread results from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn load_threshold_results(path: &Path) -> Result<Vec<ThresholdResult>> {
    let file = File::open(path).map_err(|e| AnalysisError::io(e, path))?;
    let rows = read_threshold_results(file, path)?;
    info!("loaded {} threshold results from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn read_thread_results<R: Read>(reader: R, source: &Path) -> Result<Vec<ThreadResult>> {
    read_rows(reader, source, &ThreadResult::COLUMNS)
}

pub fn read_threshold_results<R: Read>(reader: R, source: &Path) -> Result<Vec<ThresholdResult>> {
    read_rows(reader, source, &ThresholdResult::COLUMNS)
}

/// `source` only names the input in errors.
fn read_rows<T, R>(reader: R, source: &Path, columns: &[&'static str]) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AnalysisError::csv(e, source))?
        .clone();

    if let Some(column) = columns
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(AnalysisError::MissingColumn {
            path: source.to_path_buf(),
            column,
        });
    }

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|e| AnalysisError::csv(e, source))
}
