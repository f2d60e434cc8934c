//! Order book error types

use std::fmt;

/// Errors that can occur while configuring or feeding the order book.
///
/// Every rejection happens before any state is touched: an event is
/// either applied in full or the book is left exactly as it was.
#[derive(Debug)]
#[non_exhaustive]
pub enum OrderBookError {
    /// A constructor parameter was outside its valid range
    InvalidConfiguration {
        /// Description of the parameter and the offending value
        message: String,
    },

    /// A LOBSTER type code outside 1..=7
    UnknownEventType {
        /// The code as it appeared in the feed
        code: i64,
    },

    /// A LOBSTER direction code other than 1 (bid) or -1 (ask)
    InvalidDirection {
        /// The code as it appeared in the feed
        code: i64,
    },

    /// An event timestamp earlier than the current book timestamp
    NonMonotonicTimestamp {
        /// Timestamp of the rejected event
        event_timestamp: f64,
        /// Timestamp of the last processed event
        book_timestamp: f64,
    },

    /// Error while serializing snapshot data
    Serialization {
        /// Underlying error message
        message: String,
    },

    /// Error while deserializing snapshot data
    Deserialization {
        /// Underlying error message
        message: String,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidConfiguration { message } => {
                write!(f, "invalid configuration: {message}")
            }
            OrderBookError::UnknownEventType { code } => {
                write!(f, "unknown event type code: {code} (expected 1..=7)")
            }
            OrderBookError::InvalidDirection { code } => {
                write!(f, "invalid direction code: {code} (expected 1 or -1)")
            }
            OrderBookError::NonMonotonicTimestamp {
                event_timestamp,
                book_timestamp,
            } => {
                write!(
                    f,
                    "event timestamp {event_timestamp} is earlier than current book timestamp {book_timestamp}"
                )
            }
            OrderBookError::Serialization { message } => {
                write!(f, "serialization error: {message}")
            }
            OrderBookError::Deserialization { message } => {
                write!(f, "deserialization error: {message}")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
