//! Core OrderBook state: two price ladders, timestamps, OFI and trade log

use super::error::OrderBookError;
use super::event::Side;
use super::level::PriceLevel;
use super::ofi::CumulativeOfi;
use super::trade::Trade;
use std::collections::BTreeMap;

/// Default price scaling: LOBSTER prices are in units of 10^-4 currency.
pub const DEFAULT_PRICE_SCALING: f64 = 1e-4;

/// A limit order book reconstructed from a LOBSTER event stream.
///
/// The book is a deterministic state machine: events are pushed in
/// chronological order through [`OrderBook::process`], which updates the
/// two ladders, the cumulative OFI counters and the trade log. Both
/// ladders map price to a FIFO [`PriceLevel`]; bids are read highest
/// price first, asks lowest first.
///
/// The book is single-threaded by design. It is owned by its session and
/// every operation runs to completion before the next event is accepted;
/// readers that need a stable view between events take an [L2](OrderBook::l2_snapshot)
/// or [L3](OrderBook::l3_snapshot) snapshot.
#[derive(Debug, Clone)]
pub struct OrderBook {
    /// Instrument identifier (opaque to the book)
    pub(super) ticker: String,

    /// Maximum number of levels returned by the snapshot helpers
    pub(super) nlevels: usize,

    /// Minimum price increment, display-only
    pub(super) tick_size: f64,

    /// Multiplier from raw integer prices to display prices
    pub(super) price_scaling: f64,

    /// Bid ladder: price -> FIFO queue, best bid is the highest key
    pub(super) bids: BTreeMap<i64, PriceLevel>,

    /// Ask ladder: price -> FIFO queue, best ask is the lowest key
    pub(super) asks: BTreeMap<i64, PriceLevel>,

    /// Timestamp of the last processed event
    pub(super) curr_book_timestamp: f64,

    /// Midprice recorded at the last midprice change
    pub(super) midprice: Option<f64>,

    /// Timestamp of the last event that moved the midprice
    pub(super) midprice_change_timestamp: f64,

    /// Cumulative order flow imbalance since the last reset
    pub(super) cum_ofi: CumulativeOfi,

    /// Append-only log of executions and aggressive-limit fills
    pub(super) trade_log: Vec<Trade>,
}

impl OrderBook {
    /// Create a book with the default LOBSTER price scaling of `1e-4`.
    ///
    /// # Arguments
    /// - `ticker`: Instrument identifier
    /// - `nlevels`: Maximum levels returned by the snapshot helpers, > 0
    /// - `tick_size`: Minimum price increment (display-only), > 0
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidConfiguration`] when `nlevels` is
    /// zero or `tick_size` is not strictly positive.
    pub fn new(ticker: &str, nlevels: usize, tick_size: f64) -> Result<Self, OrderBookError> {
        Self::with_price_scaling(ticker, nlevels, tick_size, DEFAULT_PRICE_SCALING)
    }

    /// Create a book with an explicit price scaling.
    ///
    /// The display price of any raw feed price `p` is
    /// `p as f64 * price_scaling`.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidConfiguration`] when `nlevels` is
    /// zero, or `tick_size` or `price_scaling` is not strictly positive.
    pub fn with_price_scaling(
        ticker: &str,
        nlevels: usize,
        tick_size: f64,
        price_scaling: f64,
    ) -> Result<Self, OrderBookError> {
        if !(tick_size > 0.0) {
            return Err(OrderBookError::InvalidConfiguration {
                message: format!("tick_size must be positive, got {tick_size}"),
            });
        }
        if !(price_scaling > 0.0) {
            return Err(OrderBookError::InvalidConfiguration {
                message: format!("price_scaling must be positive, got {price_scaling}"),
            });
        }
        if nlevels == 0 {
            return Err(OrderBookError::InvalidConfiguration {
                message: "nlevels must be positive".to_string(),
            });
        }

        Ok(Self {
            ticker: ticker.to_string(),
            nlevels,
            tick_size,
            price_scaling,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            curr_book_timestamp: 0.0,
            midprice: None,
            midprice_change_timestamp: 0.0,
            cum_ofi: CumulativeOfi::new(),
            trade_log: Vec::new(),
        })
    }

    /// Instrument identifier this book was built for.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Maximum levels returned by the snapshot helpers.
    #[must_use]
    #[inline]
    pub fn nlevels(&self) -> usize {
        self.nlevels
    }

    /// Configured minimum price increment (display-only).
    #[must_use]
    #[inline]
    pub fn tick_size(&self) -> f64 {
        self.tick_size
    }

    /// Configured raw-price-to-display-price multiplier.
    #[must_use]
    #[inline]
    pub fn price_scaling(&self) -> f64 {
        self.price_scaling
    }

    /// Display price for a raw feed price.
    #[must_use]
    #[inline]
    pub fn display_price(&self, price: i64) -> f64 {
        price as f64 * self.price_scaling
    }

    /// Timestamp of the last processed event.
    #[must_use]
    #[inline]
    pub fn curr_book_timestamp(&self) -> f64 {
        self.curr_book_timestamp
    }

    /// Midprice recorded at the last midprice change, if any occurred.
    #[must_use]
    #[inline]
    pub fn midprice(&self) -> Option<f64> {
        self.midprice
    }

    /// Timestamp of the last event that moved the midprice.
    #[must_use]
    #[inline]
    pub fn midprice_change_timestamp(&self) -> f64 {
        self.midprice_change_timestamp
    }

    /// Cumulative OFI counters since the last reset.
    #[must_use]
    #[inline]
    pub fn cum_ofi(&self) -> &CumulativeOfi {
        &self.cum_ofi
    }

    /// Best (highest) bid price, if the bid side is non-empty.
    ///
    /// O(log P) via the ordered ladder; the highest price is the last key.
    #[must_use]
    pub fn best_bid(&self) -> Option<i64> {
        self.bids.keys().next_back().copied()
    }

    /// Best (lowest) ask price, if the ask side is non-empty.
    #[must_use]
    pub fn best_ask(&self) -> Option<i64> {
        self.asks.keys().next().copied()
    }

    /// Number of occupied bid price levels.
    #[must_use]
    pub fn bid_level_count(&self) -> usize {
        self.bids.len()
    }

    /// Number of occupied ask price levels.
    #[must_use]
    pub fn ask_level_count(&self) -> usize {
        self.asks.len()
    }

    /// Bid levels best-first as `(price, total_size)` pairs.
    pub fn bid_levels(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.bids
            .iter()
            .rev()
            .map(|(price, level)| (*price, level.total_size()))
    }

    /// Ask levels best-first as `(price, total_size)` pairs.
    pub fn ask_levels(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.asks
            .iter()
            .map(|(price, level)| (*price, level.total_size()))
    }

    /// The ladder for one side.
    #[must_use]
    pub(super) fn ladder(&self, side: Side) -> &BTreeMap<i64, PriceLevel> {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Mutable ladder for one side.
    pub(super) fn ladder_mut(&mut self, side: Side) -> &mut BTreeMap<i64, PriceLevel> {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Empty the ladders and reset timestamp, midprice, OFI and trade log.
    pub fn clear_orderbook(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.curr_book_timestamp = 0.0;
        self.midprice = None;
        self.midprice_change_timestamp = 0.0;
        self.reset_cum_ofi();
        self.trade_log.clear();
    }

    /// Zero all six OFI pairs, leaving the rest of the book untouched.
    pub fn reset_cum_ofi(&mut self) {
        self.cum_ofi.reset();
    }
}
