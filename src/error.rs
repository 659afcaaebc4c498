use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop an analysis run. None of these are recovered from.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O failed for {}", path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("malformed CSV in {}", path.display())]
    Csv {
        #[source]
        source: csv::Error,
        path: PathBuf,
    },

    #[error("{} has no `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("no mean times with threshold in [1, 512] for threads {low}-{high}")]
    EmptyRange { low: u32, high: u32 },

    #[error("failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },
}

impl AnalysisError {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    pub fn csv(source: csv::Error, path: impl Into<PathBuf>) -> Self {
        Self::Csv {
            source,
            path: path.into(),
        }
    }

    pub fn render(message: impl ToString, path: impl Into<PathBuf>) -> Self {
        Self::Render {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
