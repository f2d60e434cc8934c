//! L2 and L3 snapshots of the reconstructed book.
//!
//! Snapshots are plain serializable values decoupled from the live book:
//! take one between events and read it freely while the session keeps
//! feeding. Both kinds are capped at the book's configured `nlevels` and
//! ordered best-first on each side.

use super::book::OrderBook;
use super::error::OrderBookError;
use serde::{Deserialize, Serialize};

/// Aggregate size at one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2Level {
    /// Price in scaled integer ticks
    pub price: i64,
    /// Total resting size at this price
    pub size: u64,
}

/// An aggregate-per-level view of the book at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L2Snapshot {
    /// Instrument identifier
    pub ticker: String,
    /// Book timestamp the snapshot was taken at
    pub timestamp: f64,
    /// Bid levels, best (highest price) first
    pub bids: Vec<L2Level>,
    /// Ask levels, best (lowest price) first
    pub asks: Vec<L2Level>,
}

/// One resting order inside an [`L3Level`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct L3Order {
    /// Feed-assigned order identifier
    pub order_id: u64,
    /// Remaining resting size
    pub size: u64,
    /// Arrival time in seconds from midnight
    pub timestamp: f64,
}

/// Per-order detail at one price level, in arrival (priority) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L3Level {
    /// Price in scaled integer ticks
    pub price: i64,
    /// Resting orders, oldest first
    pub orders: Vec<L3Order>,
}

/// A per-order view of the book at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L3Snapshot {
    /// Instrument identifier
    pub ticker: String,
    /// Book timestamp the snapshot was taken at
    pub timestamp: f64,
    /// Bid levels, best first, each with orders oldest-first
    pub bids: Vec<L3Level>,
    /// Ask levels, best first, each with orders oldest-first
    pub asks: Vec<L3Level>,
}

impl L2Snapshot {
    /// Best bid level, if any.
    #[must_use]
    pub fn best_bid(&self) -> Option<&L2Level> {
        self.bids.first()
    }

    /// Best ask level, if any.
    #[must_use]
    pub fn best_ask(&self) -> Option<&L2Level> {
        self.asks.first()
    }

    /// Midprice of the snapshot, defined only when both sides have
    /// levels.
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.price as f64 + ask.price as f64) / 2.0),
            _ => None,
        }
    }

    /// Total size across the included bid levels.
    #[must_use]
    pub fn total_bid_volume(&self) -> u64 {
        self.bids.iter().map(|level| level.size).sum()
    }

    /// Total size across the included ask levels.
    #[must_use]
    pub fn total_ask_volume(&self) -> u64 {
        self.asks.iter().map(|level| level.size).sum()
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    /// Returns [`OrderBookError::Serialization`] when encoding fails.
    pub fn to_json(&self) -> Result<String, OrderBookError> {
        serde_json::to_string(self).map_err(|err| OrderBookError::Serialization {
            message: err.to_string(),
        })
    }

    /// Deserialize from a JSON string.
    ///
    /// # Errors
    /// Returns [`OrderBookError::Deserialization`] when decoding fails.
    pub fn from_json(json: &str) -> Result<Self, OrderBookError> {
        serde_json::from_str(json).map_err(|err| OrderBookError::Deserialization {
            message: err.to_string(),
        })
    }
}

impl L3Snapshot {
    /// Serialize to a JSON string.
    ///
    /// # Errors
    /// Returns [`OrderBookError::Serialization`] when encoding fails.
    pub fn to_json(&self) -> Result<String, OrderBookError> {
        serde_json::to_string(self).map_err(|err| OrderBookError::Serialization {
            message: err.to_string(),
        })
    }

    /// Deserialize from a JSON string.
    ///
    /// # Errors
    /// Returns [`OrderBookError::Deserialization`] when decoding fails.
    pub fn from_json(json: &str) -> Result<Self, OrderBookError> {
        serde_json::from_str(json).map_err(|err| OrderBookError::Deserialization {
            message: err.to_string(),
        })
    }
}

impl OrderBook {
    /// Aggregate-per-level snapshot of the top `nlevels` of each side.
    #[must_use]
    pub fn l2_snapshot(&self) -> L2Snapshot {
        let bids = self
            .bid_levels()
            .take(self.nlevels)
            .map(|(price, size)| L2Level { price, size })
            .collect();
        let asks = self
            .ask_levels()
            .take(self.nlevels)
            .map(|(price, size)| L2Level { price, size })
            .collect();
        L2Snapshot {
            ticker: self.ticker.clone(),
            timestamp: self.curr_book_timestamp,
            bids,
            asks,
        }
    }

    /// Per-order snapshot of the top `nlevels` of each side.
    #[must_use]
    pub fn l3_snapshot(&self) -> L3Snapshot {
        let level_detail = |price: i64, level: &super::level::PriceLevel| L3Level {
            price,
            orders: level
                .iter()
                .map(|order| L3Order {
                    order_id: order.order_id,
                    size: order.size,
                    timestamp: order.timestamp,
                })
                .collect(),
        };

        let bids = self
            .bids
            .iter()
            .rev()
            .take(self.nlevels)
            .map(|(price, level)| level_detail(*price, level))
            .collect();
        let asks = self
            .asks
            .iter()
            .take(self.nlevels)
            .map(|(price, level)| level_detail(*price, level))
            .collect();
        L3Snapshot {
            ticker: self.ticker.clone(),
            timestamp: self.curr_book_timestamp,
            bids,
            asks,
        }
    }
}
