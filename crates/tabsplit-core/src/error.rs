//! Error types for tabsplit-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabsplit-core
#[derive(Debug, Error)]
pub enum Error {
    /// Input folder is missing or is not a directory
    #[error("folder '{}' does not exist", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    Discovery(#[from] walkdir::Error),

    /// Failed to open a source file
    #[error("failed to read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Spreadsheet parsing error from calamine
    #[error("spreadsheet error in '{}': {source}", path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Structurally malformed content
    #[error("failed to parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Extension is not one of xlsx, xls, csv
    #[error("unsupported file type: '{}'", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Failed to create a chunk file
    #[error("failed to create '{}': {source}", path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a CSV chunk
    #[error("failed to write CSV '{}': {source}", path.display())]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to write an XLSX chunk
    #[error("failed to write XLSX '{}': {source}", path.display())]
    XlsxWrite {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Chunk size that is not a positive integer
    #[error("invalid chunk size: '{0}'")]
    InvalidChunkSize(String),

    /// Output format outside the accepted set
    #[error("invalid output format: '{0}' (expected xlsx or csv)")]
    InvalidFormatChoice(String),

    /// Input stream ended while waiting for an answer
    #[error("input closed before a value was entered")]
    InputClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors raised while loading a source file
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. }
                | Error::Csv { .. }
                | Error::Spreadsheet { .. }
                | Error::Parse { .. }
                | Error::UnsupportedFormat { .. }
        )
    }

    /// True for errors raised while writing a chunk file
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Error::FileCreate { .. }
                | Error::CsvWrite { .. }
                | Error::XlsxWrite { .. }
                | Error::Io(_)
        )
    }
}
