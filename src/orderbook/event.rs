//! Market event and resting order types for the LOBSTER message schema.
//!
//! A LOBSTER message file carries one event per row: a timestamp in
//! fractional seconds from midnight, a type code, the feed-assigned order
//! id, a size, a price in scaled integer ticks, and a direction. [`Side`]
//! and [`EventKind`] map the integer codes; [`MarketEvent`] is the typed
//! row and [`RestingOrder`] is the mutable record a `submit` leaves on the
//! book.

use super::error::OrderBookError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the book an order belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy side (direction code `1`)
    Bid,
    /// Sell side (direction code `-1`)
    Ask,
}

impl Side {
    /// Map a LOBSTER direction code (`1` = bid, `-1` = ask).
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidDirection`] for any other code.
    pub fn from_lobster(code: i64) -> Result<Self, OrderBookError> {
        match code {
            1 => Ok(Side::Bid),
            -1 => Ok(Side::Ask),
            _ => Err(OrderBookError::InvalidDirection { code }),
        }
    }

    /// The other side of the book.
    #[must_use]
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

/// The seven LOBSTER event kinds.
///
/// `Cross` and `Halt` are accepted by the book but cause no state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// New limit order (type 1)
    #[serde(rename = "submit")]
    Submit,
    /// Partial cancellation of a resting order (type 2)
    #[serde(rename = "cancel")]
    Cancel,
    /// Full deletion of a resting order (type 3)
    #[serde(rename = "delete")]
    Delete,
    /// Execution of a visible resting order (type 4)
    #[serde(rename = "vis_exec")]
    VisibleExec,
    /// Execution of a hidden order (type 5)
    #[serde(rename = "hid_exec")]
    HiddenExec,
    /// Auction cross trade (type 6)
    #[serde(rename = "cross")]
    Cross,
    /// Trading halt indicator (type 7)
    #[serde(rename = "halt")]
    Halt,
}

impl EventKind {
    /// Map a LOBSTER type code (`1..=7`).
    ///
    /// # Errors
    /// Returns [`OrderBookError::UnknownEventType`] for any other code.
    pub fn from_lobster(code: i64) -> Result<Self, OrderBookError> {
        match code {
            1 => Ok(EventKind::Submit),
            2 => Ok(EventKind::Cancel),
            3 => Ok(EventKind::Delete),
            4 => Ok(EventKind::VisibleExec),
            5 => Ok(EventKind::HiddenExec),
            6 => Ok(EventKind::Cross),
            7 => Ok(EventKind::Halt),
            _ => Err(OrderBookError::UnknownEventType { code }),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Submit => "submit",
            EventKind::Cancel => "cancel",
            EventKind::Delete => "delete",
            EventKind::VisibleExec => "vis_exec",
            EventKind::HiddenExec => "hid_exec",
            EventKind::Cross => "cross",
            EventKind::Halt => "halt",
        };
        write!(f, "{name}")
    }
}

/// A single immutable feed message.
///
/// `price` is in scaled integer ticks; the display price is
/// `price * price_scaling` (see [`crate::orderbook::OrderBook`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    /// Seconds from midnight, fractional
    pub timestamp: f64,
    /// What happened
    pub kind: EventKind,
    /// Feed-assigned order identifier
    pub order_id: u64,
    /// Shares affected; exact meaning depends on `kind`
    pub size: u64,
    /// Price in scaled integer ticks
    pub price: i64,
    /// Side of the order the event refers to
    pub side: Side,
}

impl MarketEvent {
    /// Create an event from already-typed fields.
    #[must_use]
    pub fn new(
        timestamp: f64,
        kind: EventKind,
        order_id: u64,
        size: u64,
        price: i64,
        side: Side,
    ) -> Self {
        Self {
            timestamp,
            kind,
            order_id,
            size,
            price,
            side,
        }
    }
}

impl fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} id={} size={} price={} {}",
            self.timestamp, self.kind, self.order_id, self.size, self.price, self.side
        )
    }
}

/// A limit order resting on the book.
///
/// Created by a `submit` (possibly after partial aggressive execution);
/// `size` only ever decreases while resting, and a reduction to zero
/// removes the record. The arrival `timestamp` fixes time priority within
/// a price level and feeds the elapsed-time queries, where this type also
/// doubles as the hypothetical-order argument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestingOrder {
    /// Arrival time in seconds from midnight
    pub timestamp: f64,
    /// Feed-assigned order identifier
    pub order_id: u64,
    /// Remaining visible shares
    pub size: u64,
    /// Price in scaled integer ticks
    pub price: i64,
    /// Side of the book the order rests on
    pub side: Side,
}

impl RestingOrder {
    /// Create a resting order record.
    #[must_use]
    pub fn new(timestamp: f64, order_id: u64, size: u64, price: i64, side: Side) -> Self {
        Self {
            timestamp,
            order_id,
            size,
            price,
            side,
        }
    }
}
