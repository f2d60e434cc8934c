//! Error types for the replay subsystem.
//!
//! [`ReplayError`] covers all failure modes of CSV ingestion, session
//! control and reference-book verification.

use crate::orderbook::OrderBookError;
use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while loading feed files or driving a replay
/// session.
#[derive(Debug)]
#[non_exhaustive]
pub enum ReplayError {
    /// An error raised by the underlying order book
    Book(OrderBookError),

    /// An I/O error occurred while reading or writing a file
    Io {
        /// The underlying I/O error message
        message: String,
        /// The file path involved, if known
        path: Option<PathBuf>,
    },

    /// The CSV reader or writer failed
    Csv {
        /// The underlying CSV error message
        message: String,
    },

    /// A feed row could not be parsed
    MalformedRow {
        /// 1-based line number within the file
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// A reference orderbook file whose column count is not a multiple
    /// of 4
    MalformedReferenceFile {
        /// The column count found in the first row
        columns: usize,
    },

    /// `simulate_from_current_until` asked to run backwards in time
    TimeReversal {
        /// The requested target timestamp
        requested: f64,
        /// The current book timestamp
        current: f64,
    },

    /// A feature name that no query resolves to
    UnknownFeature {
        /// The name as given at registration
        name: String,
    },

    /// A feature that needs an argument was registered without one
    MissingFeatureArgument {
        /// The feature name
        name: String,
    },

    /// The reconstructed book diverged from the reference orderbook file
    ReferenceMismatch {
        /// 0-based row index in the reference file
        row: usize,
        /// Description of the divergence
        message: String,
    },

    /// A reference-book operation was requested but no reference file
    /// was loaded
    MissingReference,

    /// Message and reference files disagree on row count
    RowCountMismatch {
        /// Rows in the message file
        messages: usize,
        /// Rows in the reference file
        reference: usize,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Book(err) => write!(f, "order book error: {err}"),
            ReplayError::Io { message, path } => {
                if let Some(p) = path {
                    write!(f, "I/O error at {}: {message}", p.display())
                } else {
                    write!(f, "I/O error: {message}")
                }
            }
            ReplayError::Csv { message } => write!(f, "CSV error: {message}"),
            ReplayError::MalformedRow { line, message } => {
                write!(f, "malformed row at line {line}: {message}")
            }
            ReplayError::MalformedReferenceFile { columns } => {
                write!(
                    f,
                    "reference orderbook file has {columns} columns, expected a multiple of 4"
                )
            }
            ReplayError::TimeReversal { requested, current } => {
                write!(
                    f,
                    "target time {requested} is earlier than current book timestamp {current}"
                )
            }
            ReplayError::UnknownFeature { name } => {
                write!(f, "unknown feature: {name:?}")
            }
            ReplayError::MissingFeatureArgument { name } => {
                write!(f, "feature {name:?} requires an argument")
            }
            ReplayError::ReferenceMismatch { row, message } => {
                write!(f, "reference mismatch at row {row}: {message}")
            }
            ReplayError::MissingReference => {
                write!(f, "no reference orderbook file was loaded")
            }
            ReplayError::RowCountMismatch {
                messages,
                reference,
            } => {
                write!(
                    f,
                    "row count mismatch: {messages} message rows, {reference} reference rows"
                )
            }
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<OrderBookError> for ReplayError {
    fn from(err: OrderBookError) -> Self {
        ReplayError::Book(err)
    }
}

impl From<csv::Error> for ReplayError {
    #[cold]
    fn from(err: csv::Error) -> Self {
        ReplayError::Csv {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ReplayError {
    #[cold]
    fn from(err: std::io::Error) -> Self {
        ReplayError::Io {
            message: err.to_string(),
            path: None,
        }
    }
}
