//! Trade records, the append-only trade log, and multi-trade analytics.

use super::book::OrderBook;
use super::event::Side;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// How a trade came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeKind {
    /// Execution of a visible resting order (feed type 4)
    #[serde(rename = "vis_exec")]
    VisExec,
    /// Fill produced by a crossing limit order matching resting liquidity
    #[serde(rename = "aggro_lim")]
    AggroLim,
    /// Execution of a hidden order (feed type 5)
    #[serde(rename = "hid_exec")]
    HidExec,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TradeKind::VisExec => "vis_exec",
            TradeKind::AggroLim => "aggro_lim",
            TradeKind::HidExec => "hid_exec",
        };
        write!(f, "{name}")
    }
}

/// One executed trade.
///
/// `side` is the side of the *matched* resting order: a `Bid` trade means
/// a bid limit order was hit, an `Ask` trade means an ask was lifted. For
/// `aggro_lim` fills `order_id` carries the aggressor's id and `price`
/// the resting level's price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Execution time in seconds from midnight
    pub timestamp: f64,
    /// How the trade came about
    pub kind: TradeKind,
    /// Side of the matched resting order
    pub side: Side,
    /// Executed shares
    pub size: u64,
    /// Execution price in scaled integer ticks
    pub price: i64,
    /// Order id of the event that produced the trade
    pub order_id: u64,
}

impl OrderBook {
    /// Append a trade to the log.
    pub(super) fn record_trade(
        &mut self,
        timestamp: f64,
        kind: TradeKind,
        side: Side,
        size: u64,
        price: i64,
        order_id: u64,
    ) {
        self.trade_log.push(Trade {
            timestamp,
            kind,
            side,
            size,
            price,
            order_id,
        });
    }

    /// All trades recorded since the last clear, in execution order.
    #[must_use]
    pub fn trade_log(&self) -> &[Trade] {
        &self.trade_log
    }

    /// Drop all recorded trades, leaving the book state untouched.
    pub fn clear_trade_log(&mut self) {
        self.trade_log.clear();
    }

    /// Group the trade log into meta-orders.
    ///
    /// A meta-order is a maximal run of consecutive trades that share the
    /// first member's [`TradeKind`] and arrive within `time_delta`
    /// seconds of it. `time_delta = 0.0` yields same-timestamp same-kind
    /// runs. The returned slices partition the log: concatenated in
    /// order, they reproduce it exactly.
    #[must_use]
    pub fn meta_orders(&self, time_delta: f64) -> Vec<&[Trade]> {
        let log = &self.trade_log;
        let mut groups = Vec::new();
        let mut i = 0;
        while i < log.len() {
            let mut j = i + 1;
            while j < log.len()
                && log[j].timestamp - log[i].timestamp <= time_delta
                && log[j].kind == log[i].kind
            {
                j += 1;
            }
            groups.push(&log[i..j]);
            i = j;
        }
        groups
    }

    /// Meta-orders that swept at least `level_threshold` distinct prices.
    #[must_use]
    pub fn order_sweeps(&self, time_delta: f64, level_threshold: usize) -> Vec<&[Trade]> {
        self.meta_orders(time_delta)
            .into_iter()
            .filter(|group| {
                let prices: HashSet<i64> = group.iter().map(|trade| trade.price).collect();
                prices.len() >= level_threshold
            })
            .collect()
    }
}
