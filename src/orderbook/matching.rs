//! Spread-crossing execution: matching a marketable limit order against
//! resting liquidity on the opposite ladder.

use super::book::OrderBook;
use super::event::{MarketEvent, Side};
use super::trade::TradeKind;
use tracing::trace;

impl OrderBook {
    /// Whether a limit order at `price` would cross the spread.
    ///
    /// A bid crosses when the ask side is non-empty and `price` reaches
    /// the best ask; an ask crosses when the bid side is non-empty and
    /// `price` reaches down to the best bid. An empty opposite side never
    /// crosses.
    #[must_use]
    pub fn crosses_spread(&self, side: Side, price: i64) -> bool {
        match side {
            Side::Bid => self.best_ask().is_some_and(|ask| price >= ask),
            Side::Ask => self.best_bid().is_some_and(|bid| price <= bid),
        }
    }

    /// Walk the opposite ladder best-first, consuming resting orders in
    /// FIFO order until the incoming order is filled or no longer
    /// crosses. Returns the unfilled remainder.
    ///
    /// Each fill is recorded as an `aggro_lim` trade at the resting
    /// price, carrying the *resting* order's side and the aggressor's
    /// order id, and counts as marketable flow against the side whose
    /// liquidity was taken.
    pub(super) fn execute_against_opposite_book(&mut self, event: &MarketEvent) -> u64 {
        let mut remaining = event.size;

        while remaining > 0 {
            let Some(best_price) = (match event.side {
                Side::Bid => self.best_ask(),
                Side::Ask => self.best_bid(),
            }) else {
                break;
            };
            let crosses = match event.side {
                Side::Bid => event.price >= best_price,
                Side::Ask => event.price <= best_price,
            };
            if !crosses {
                break;
            }

            let opposite = self.ladder_mut(event.side.opposite());
            let Some(level) = opposite.get_mut(&best_price) else {
                break;
            };
            let Some(front) = level.front_mut() else {
                break;
            };

            let trade_size = remaining.min(front.size);
            front.size -= trade_size;
            remaining -= trade_size;
            if front.size == 0 {
                level.pop_front();
            }
            if level.is_empty() {
                opposite.remove(&best_price);
            }

            self.record_trade(
                event.timestamp,
                TradeKind::AggroLim,
                event.side.opposite(),
                trade_size,
                best_price,
                event.order_id,
            );
            match event.side {
                Side::Bid => self.cum_ofi.ma.add(trade_size),
                Side::Ask => self.cum_ofi.mb.add(trade_size),
            }
            trace!(
                "book {}: aggressive fill id={} size={} @ {} against {} side",
                self.ticker,
                event.order_id,
                trade_size,
                best_price,
                event.side.opposite()
            );
        }

        remaining
    }
}
