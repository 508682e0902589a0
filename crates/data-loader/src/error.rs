//! Error types for the data-loader crate.
//!
//! Every variant that originates in a worksheet carries the file name, so a
//! failed load points straight at the offending export.

use thiserror::Error;

/// Errors that can occur while loading worksheet exports
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Worksheet export could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error reading {file}: {source}")]
    IoError {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be decoded by the CSV reader
    ///
    /// `line` is `None` when the reader could not attribute the failure to a
    /// row (for example a broken header).
    #[error("CSV error in {file} at line {line:?}: {source}")]
    CsvError {
        file: String,
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },

    /// A cell had a value we could not interpret
    #[error("Invalid value for {field} in {file} at line {line}: {value:?}")]
    InvalidValue {
        file: String,
        line: u64,
        field: String,
        value: String,
    },
}

impl DataLoadError {
    /// Wrap a csv error with the worksheet it came from.
    ///
    /// The csv reader reports read failures as its own error kind; those are
    /// reported as `IoError` instead.
    pub(crate) fn csv(file: &str, source: csv::Error) -> Self {
        if let csv::ErrorKind::Io(err) = source.kind() {
            return DataLoadError::IoError {
                file: file.to_string(),
                source: std::io::Error::new(err.kind(), err.to_string()),
            };
        }
        let line = source.position().map(|p| p.line());
        DataLoadError::CsvError {
            file: file.to_string(),
            line,
            source,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
