//! Replay session: drives an [`OrderBook`] through a loaded event
//! stream and verifies the reconstruction against reference snapshots.

use super::error::ReplayError;
use super::loader::{ReferenceLevel, read_message_file, read_orderbook_file};
use crate::orderbook::{MarketEvent, OrderBook};
use std::path::Path;
use tracing::trace;

/// A replay session owning a book, a chronological event stream and an
/// opaque cursor into it.
///
/// The cursor only moves forward; [`ReplaySession::simulate_until`]
/// rewinds it by clearing the book and starting over, which makes
/// repeated calls with the same target time idempotent.
#[derive(Debug, Clone)]
pub struct ReplaySession {
    book: OrderBook,
    events: Vec<MarketEvent>,
    reference: Option<Vec<Vec<ReferenceLevel>>>,
    cursor: usize,
}

impl ReplaySession {
    /// Create a session over an already-loaded event stream.
    #[must_use]
    pub fn new(book: OrderBook, events: Vec<MarketEvent>) -> Self {
        Self {
            book,
            events,
            reference: None,
            cursor: 0,
        }
    }

    /// Create a session by loading a LOBSTER message file.
    ///
    /// # Errors
    /// Propagates loader errors (see [`read_message_file`]).
    pub fn from_files(book: OrderBook, msg_path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let events = read_message_file(msg_path)?;
        Ok(Self::new(book, events))
    }

    /// Create a session with a reference orderbook file for
    /// reconstruction verification.
    ///
    /// # Errors
    /// Propagates loader errors (see [`read_message_file`] and
    /// [`read_orderbook_file`]).
    pub fn with_reference_file(
        book: OrderBook,
        msg_path: impl AsRef<Path>,
        lob_path: impl AsRef<Path>,
    ) -> Result<Self, ReplayError> {
        let events = read_message_file(msg_path)?;
        let reference = read_orderbook_file(lob_path)?;
        Ok(Self {
            book,
            events,
            reference: Some(reference),
            cursor: 0,
        })
    }

    /// The reconstructed book.
    #[must_use]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Mutable access to the book (for OFI or trade-log resets between
    /// simulation windows).
    pub fn book_mut(&mut self) -> &mut OrderBook {
        &mut self.book
    }

    /// The loaded event stream.
    #[must_use]
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Number of events consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Reset the book and replay from the beginning of the stream while
    /// `event.timestamp <= time`.
    ///
    /// # Errors
    /// Propagates [`ReplayError::Book`] if the stream itself violates
    /// timestamp monotonicity.
    pub fn simulate_until(&mut self, time: f64) -> Result<(), ReplayError> {
        self.cursor = 0;
        self.book.clear_orderbook();
        self.advance_while(time)
    }

    /// Continue replaying from the current cursor while
    /// `event.timestamp <= time`, without resetting any state.
    ///
    /// # Errors
    /// Returns [`ReplayError::TimeReversal`] when `time` is earlier than
    /// the current book timestamp.
    pub fn simulate_from_current_until(&mut self, time: f64) -> Result<(), ReplayError> {
        if time < self.book.curr_book_timestamp() {
            return Err(ReplayError::TimeReversal {
                requested: time,
                current: self.book.curr_book_timestamp(),
            });
        }
        self.advance_while(time)
    }

    fn advance_while(&mut self, time: f64) -> Result<(), ReplayError> {
        while let Some(event) = self.events.get(self.cursor) {
            if event.timestamp > time {
                break;
            }
            self.book.process(event)?;
            self.cursor += 1;
        }
        trace!(
            "session {}: cursor at {} after simulating to {time}",
            self.book.ticker(),
            self.cursor
        );
        Ok(())
    }

    /// Process the next `count` events regardless of their timestamps.
    /// Stops early at the end of the stream.
    ///
    /// # Errors
    /// Propagates [`ReplayError::Book`] on a non-monotone stream.
    pub fn step(&mut self, count: usize) -> Result<(), ReplayError> {
        for _ in 0..count {
            let Some(event) = self.events.get(self.cursor) else {
                break;
            };
            self.book.process(event)?;
            self.cursor += 1;
        }
        Ok(())
    }

    /// Cumulative size OFI accumulated over `(start, end]`: replays to
    /// `start`, zeroes the OFI counters, then continues to `end`.
    ///
    /// # Errors
    /// Returns [`ReplayError::TimeReversal`] when `end < start`.
    pub fn sim_size_ofi(&mut self, start: f64, end: f64) -> Result<i64, ReplayError> {
        self.simulate_until(start)?;
        self.book.reset_cum_ofi();
        self.simulate_from_current_until(end)?;
        Ok(self.book.size_ofi())
    }

    /// Cumulative count OFI accumulated over `(start, end]`.
    ///
    /// # Errors
    /// Returns [`ReplayError::TimeReversal`] when `end < start`.
    pub fn sim_count_ofi(&mut self, start: f64, end: f64) -> Result<i64, ReplayError> {
        self.simulate_until(start)?;
        self.book.reset_cum_ofi();
        self.simulate_from_current_until(end)?;
        Ok(self.book.count_ofi())
    }

    /// Check that message and reference files have the same row count.
    ///
    /// # Errors
    /// [`ReplayError::MissingReference`] without a reference file,
    /// [`ReplayError::RowCountMismatch`] when the counts differ.
    pub fn validate_alignment(&self) -> Result<(), ReplayError> {
        let Some(reference) = &self.reference else {
            return Err(ReplayError::MissingReference);
        };
        if self.events.len() != reference.len() {
            return Err(ReplayError::RowCountMismatch {
                messages: self.events.len(),
                reference: reference.len(),
            });
        }
        Ok(())
    }

    /// Compare the top `levels` of the reconstruction with the reference
    /// row for the last processed message.
    ///
    /// # Errors
    /// [`ReplayError::MissingReference`] without a reference file;
    /// [`ReplayError::ReferenceMismatch`] on any price or size
    /// divergence, on a reconstructed level where the reference has an
    /// absent-level sentinel, or vice versa.
    pub fn check_books_match(&self, levels: usize) -> Result<(), ReplayError> {
        let Some(reference) = &self.reference else {
            return Err(ReplayError::MissingReference);
        };
        let Some(row_index) = self.cursor.checked_sub(1) else {
            return Err(ReplayError::ReferenceMismatch {
                row: 0,
                message: "no messages processed yet".to_string(),
            });
        };
        let Some(row) = reference.get(row_index) else {
            return Err(ReplayError::ReferenceMismatch {
                row: row_index,
                message: "reference file has no row for this message".to_string(),
            });
        };

        let mismatch = |message: String| ReplayError::ReferenceMismatch {
            row: row_index,
            message,
        };

        let mut asks = self.book.ask_levels();
        let mut bids = self.book.bid_levels();
        for depth in 0..levels {
            let slot = row.get(depth);

            let csv_ask = slot.filter(|s| s.ask_present());
            match (asks.next(), csv_ask) {
                (Some((price, size)), Some(slot)) => {
                    if price != slot.ask_price || size != slot.ask_size {
                        return Err(mismatch(format!(
                            "ask level {depth}: reconstructed ({price}, {size}), reference ({}, {})",
                            slot.ask_price, slot.ask_size
                        )));
                    }
                }
                (Some((price, _)), None) => {
                    return Err(mismatch(format!(
                        "ask level {depth} unexpectedly present in reconstruction at price {price}"
                    )));
                }
                (None, Some(slot)) => {
                    return Err(mismatch(format!(
                        "ask level {depth} missing in reconstruction, reference has price {}",
                        slot.ask_price
                    )));
                }
                (None, None) => {}
            }

            let csv_bid = slot.filter(|s| s.bid_present());
            match (bids.next(), csv_bid) {
                (Some((price, size)), Some(slot)) => {
                    if price != slot.bid_price || size != slot.bid_size {
                        return Err(mismatch(format!(
                            "bid level {depth}: reconstructed ({price}, {size}), reference ({}, {})",
                            slot.bid_price, slot.bid_size
                        )));
                    }
                }
                (Some((price, _)), None) => {
                    return Err(mismatch(format!(
                        "bid level {depth} unexpectedly present in reconstruction at price {price}"
                    )));
                }
                (None, Some(slot)) => {
                    return Err(mismatch(format!(
                        "bid level {depth} missing in reconstruction, reference has price {}",
                        slot.bid_price
                    )));
                }
                (None, None) => {}
            }
        }

        Ok(())
    }

    /// Replay the entire stream from a clean book, verifying every
    /// message against its reference row.
    ///
    /// # Errors
    /// The first [`ReplayError::ReferenceMismatch`] encountered, or
    /// [`ReplayError::MissingReference`] without a reference file.
    pub fn verify_full_replay(&mut self, levels: usize) -> Result<(), ReplayError> {
        if self.reference.is_none() {
            return Err(ReplayError::MissingReference);
        }
        self.cursor = 0;
        self.book.clear_orderbook();
        while let Some(event) = self.events.get(self.cursor) {
            let event = *event;
            self.book.process(&event)?;
            self.cursor += 1;
            self.check_books_match(levels)?;
        }
        Ok(())
    }
}
