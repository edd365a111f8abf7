use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Failure while reading or parsing the input catalogue.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),
    #[error("row {row}: '{value}' is not a valid StartDateTime (expected DD.MM.YYYY HH:MM)")]
    InvalidTimestamp { row: usize, value: String },
    #[error("row {row}: column '{column}' holds '{value}', expected a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Failure while persisting the sampled catalogue.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize rows for '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Any fatal failure of a sampling run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load catalogue: {0}")]
    Load(#[from] LoadError),
    #[error("failed to write sample: {0}")]
    Write(#[from] WriteError),
}

/// Discriminant of a [`PipelineError`], for callers that only branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    Load,
    Write,
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PipelineError::Load(_) => FailureKind::Load,
            PipelineError::Write(_) => FailureKind::Write,
        }
    }
}
