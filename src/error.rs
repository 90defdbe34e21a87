//! Error types for report analysis and the report store

use thiserror::Error;

/// Errors raised by clustering and proximity queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Latitude or longitude is non-finite or outside the degree range.
    /// Per-record: the record is skipped and reported, the batch goes on.
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Proximity query over zero usable reports
    #[error("no reports to search")]
    EmptyDataset,

    /// Every report is noise, there is no spatial concentration to target
    #[error("no clusters found, every report is noise")]
    NoClustersFound,

    /// Clustering parameters out of range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// A date that is not a zero padded `YYYYMMDD` or `YYYY-MM-DD` value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date {0:?}, expected YYYYMMDD or YYYY-MM-DD")]
pub struct DateError(pub String);

/// Errors raised while reading or writing a CSV store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: missing field `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: field `{field}` is not a number: {value:?}")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: invalid date {value:?}, expected YYYYMMDD")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: invalid time {value:?}, expected HH:MM[:SS]")]
    InvalidTime { row: usize, value: String },

    #[error("row {row}: coordinate ({lat}, {lon}) out of range")]
    InvalidCoordinate { row: usize, lat: f64, lon: f64 },

    #[error(transparent)]
    Rejected(#[from] AnalysisError),

    #[error("row {row}: unknown accessibility feature {value:?}")]
    UnknownAccessFeature { row: usize, value: String },
}
