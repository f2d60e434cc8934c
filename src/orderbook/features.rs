//! Pure feature queries over the reconstructed book state.
//!
//! Everything here is a read: none of these touch the ladders, the OFI
//! counters or the trade log. Queries that are undefined on a one-sided
//! book return `Option` (price-like values) or fall back to zero
//! (volume-like values) instead of doing arithmetic on sentinels.

use super::book::OrderBook;
use super::event::{RestingOrder, Side};
use super::level::PriceLevel;
use std::ops::Bound;

impl OrderBook {
    /// Highest bid price, if the bid side is non-empty.
    #[must_use]
    #[inline]
    pub fn highest_bid_price(&self) -> Option<i64> {
        self.best_bid()
    }

    /// Lowest ask price, if the ask side is non-empty.
    #[must_use]
    #[inline]
    pub fn lowest_ask_price(&self) -> Option<i64> {
        self.best_ask()
    }

    /// Total resting size at the best bid; 0 when the bid side is empty.
    #[must_use]
    pub fn highest_bid_volume(&self) -> u64 {
        self.bids
            .values()
            .next_back()
            .map_or(0, PriceLevel::total_size)
    }

    /// Total resting size at the best ask; 0 when the ask side is empty.
    #[must_use]
    pub fn lowest_ask_volume(&self) -> u64 {
        self.asks.values().next().map_or(0, PriceLevel::total_size)
    }

    /// Best ask minus best bid, defined only on a two-sided book.
    #[must_use]
    pub fn bid_ask_spread(&self) -> Option<i64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Midprice `(best_bid + best_ask) / 2`, defined only on a two-sided
    /// book.
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid as f64 + ask as f64) / 2.0),
            _ => None,
        }
    }

    /// Lowest (worst) occupied bid price.
    #[must_use]
    pub fn worst_bid_price(&self) -> Option<i64> {
        self.bids.keys().next().copied()
    }

    /// Highest (worst) occupied ask price.
    #[must_use]
    pub fn worst_ask_price(&self) -> Option<i64> {
        self.asks.keys().next_back().copied()
    }

    /// Worst ask minus worst bid: the full occupied price range.
    #[must_use]
    pub fn orderbook_price_range(&self) -> Option<i64> {
        match (self.worst_bid_price(), self.worst_ask_price()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Signed share-based order flow imbalance since the last OFI reset.
    #[must_use]
    #[inline]
    pub fn size_ofi(&self) -> i64 {
        self.cum_ofi.size_ofi()
    }

    /// Signed count-based order flow imbalance since the last OFI reset.
    #[must_use]
    #[inline]
    pub fn count_ofi(&self) -> i64 {
        self.cum_ofi.count_ofi()
    }

    /// Resting size at `price`, summed across both sides.
    #[must_use]
    pub fn available_vol_at_price(&self, price: i64) -> u64 {
        let bid_size = self.bids.get(&price).map_or(0, PriceLevel::total_size);
        let ask_size = self.asks.get(&price).map_or(0, PriceLevel::total_size);
        bid_size + ask_size
    }

    /// Total resting size across all bid levels.
    #[must_use]
    pub fn total_bid_volume(&self) -> u64 {
        self.bids.values().map(PriceLevel::total_size).sum()
    }

    /// Total resting size across all ask levels.
    #[must_use]
    pub fn total_ask_volume(&self) -> u64 {
        self.asks.values().map(PriceLevel::total_size).sum()
    }

    /// Size resting ahead of a hypothetical order in the same-side queue:
    /// everything at strictly better prices. Orders at the same price
    /// contribute nothing.
    #[must_use]
    pub fn volume_of_higher_priority_orders(&self, order: &RestingOrder) -> u64 {
        match order.side {
            Side::Bid => self
                .bids
                .range((Bound::Excluded(order.price), Bound::Unbounded))
                .map(|(_, level)| level.total_size())
                .sum(),
            Side::Ask => self
                .asks
                .range(..order.price)
                .map(|(_, level)| level.total_size())
                .sum(),
        }
    }

    /// Opposite-side size strictly inside the price mirrored through the
    /// midprice.
    ///
    /// For a bid at `p` below the mid, this sums ask levels priced below
    /// `2·mid − p`; symmetrically for asks above the mid. Returns 0 when
    /// the midprice is undefined or the order sits at or through it.
    #[must_use]
    pub fn symmetric_opposite_book_volume(&self, order: &RestingOrder) -> u64 {
        let Some(mid) = self.mid_price() else {
            return 0;
        };
        let symmetric = 2.0 * mid - order.price as f64;
        match order.side {
            Side::Bid => {
                if order.price as f64 >= mid {
                    return 0;
                }
                self.asks
                    .iter()
                    .take_while(|(price, _)| (**price as f64) < symmetric)
                    .map(|(_, level)| level.total_size())
                    .sum()
            }
            Side::Ask => {
                if order.price as f64 <= mid {
                    return 0;
                }
                self.bids
                    .iter()
                    .rev()
                    .take_while(|(price, _)| (**price as f64) > symmetric)
                    .map(|(_, level)| level.total_size())
                    .sum()
            }
        }
    }

    /// Total size on the side opposite the hypothetical order.
    #[must_use]
    pub fn opposite_side_book_depth(&self, order: &RestingOrder) -> u64 {
        match order.side {
            Side::Bid => self.total_ask_volume(),
            Side::Ask => self.total_bid_volume(),
        }
    }

    /// Total size on the hypothetical order's own side.
    #[must_use]
    pub fn same_side_book_depth(&self, order: &RestingOrder) -> u64 {
        match order.side {
            Side::Bid => self.total_bid_volume(),
            Side::Ask => self.total_ask_volume(),
        }
    }

    /// Seconds since the oldest resting order at the hypothetical
    /// order's price arrived; 0 when no such level exists.
    #[must_use]
    pub fn time_elapsed_since_first_available_order_with_same_price(
        &self,
        order: &RestingOrder,
    ) -> f64 {
        self.ladder(order.side)
            .get(&order.price)
            .and_then(PriceLevel::front)
            .map_or(0.0, |first| order.timestamp - first.timestamp)
    }

    /// Seconds since the newest resting order at the hypothetical
    /// order's price arrived; 0 when no such level exists.
    #[must_use]
    pub fn time_elapsed_since_most_recent_order_with_same_price(
        &self,
        order: &RestingOrder,
    ) -> f64 {
        self.ladder(order.side)
            .get(&order.price)
            .and_then(PriceLevel::back)
            .map_or(0.0, |last| order.timestamp - last.timestamp)
    }

    /// Seconds between the hypothetical order and the last midprice move.
    #[must_use]
    pub fn time_elapsed_since_mid_price_change(&self, order: &RestingOrder) -> f64 {
        order.timestamp - self.midprice_change_timestamp
    }
}
