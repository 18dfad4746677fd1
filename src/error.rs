// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a source table into a `RecordStore`.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Dataset file {} could not be read: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
}

/// A batch document that cannot be run. Item indices are 1-based.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Batch file is not valid RON: {0}")]
    Malformed(String),

    #[error("Batch file contains no analyses")]
    Empty,

    #[error("Analysis #{index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Analysis #{index}: unknown type '{kind}' (expected 'region' or 'country_trend')")]
    UnknownType { index: usize, kind: String },

    #[error("Analysis #{index}: invalid '{field}': {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Unknown operation '{0}' (expected average, sum, max or min)")]
    InvalidOperation(String),

    #[error("Unknown graph type '{0}' (expected bar, pie or line)")]
    InvalidChart(String),

    #[error("Start year {start} cannot be after end year {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("Country '{0}' not found")]
    CountryNotFound(String),
}

/// Rejections raised by the dashboard query form before a request is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("No dataset loaded")]
    NoDataset,

    #[error("Please select a region")]
    MissingRegion,

    #[error("Please enter a country name")]
    MissingCountry,

    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i32,
        max: i32,
    },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
