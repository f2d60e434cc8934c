//! Event dispatcher and the seven event handlers.
//!
//! [`OrderBook::process`] is the single entry point for feed messages.
//! It validates the timestamp, routes on the event kind, and maintains
//! the midprice-change timestamp around the mutation. Handlers classify
//! flow into the OFI counters against the best quote captured *before*
//! the event mutates the book.
//!
//! Feed messages that reference an order the book does not hold
//! (cancel/delete/vis_exec after a lost or filtered submit) are logged at
//! WARN and leave every piece of state untouched, including the OFI
//! counters and the trade log.

use super::book::OrderBook;
use super::error::OrderBookError;
use super::event::{EventKind, MarketEvent, RestingOrder, Side};
use super::trade::TradeKind;
use tracing::{trace, warn};

impl OrderBook {
    /// Apply one feed event to the book.
    ///
    /// Events must arrive in chronological order; equal timestamps are
    /// allowed. On success the book timestamp equals `event.timestamp`
    /// and, when the event moved the midprice while both sides stayed
    /// populated, the midprice-change timestamp is bumped as well.
    ///
    /// # Errors
    /// Returns [`OrderBookError::NonMonotonicTimestamp`] when the event
    /// is older than the current book timestamp. The book is unchanged
    /// on error.
    pub fn process(&mut self, event: &MarketEvent) -> Result<(), OrderBookError> {
        if event.timestamp < self.curr_book_timestamp {
            return Err(OrderBookError::NonMonotonicTimestamp {
                event_timestamp: event.timestamp,
                book_timestamp: self.curr_book_timestamp,
            });
        }
        self.curr_book_timestamp = event.timestamp;

        let prev_mid = self.mid_price();
        match event.kind {
            EventKind::Submit => self.apply_submit(event),
            EventKind::Cancel => self.apply_cancel(event),
            EventKind::Delete => self.apply_delete(event),
            EventKind::VisibleExec => self.apply_visible_exec(event),
            EventKind::HiddenExec => self.apply_hidden_exec(event),
            EventKind::Cross | EventKind::Halt => {}
        }
        let new_mid = self.mid_price();

        // The change timestamp only moves when a midprice existed on both
        // sides of the event and actually changed.
        if let (Some(prev), Some(new)) = (prev_mid, new_mid) {
            if new != prev {
                self.midprice = Some(new);
                self.midprice_change_timestamp = event.timestamp;
            }
        }

        Ok(())
    }

    /// New limit order: match aggressively while it crosses the spread,
    /// then rest any remainder at its limit price.
    fn apply_submit(&mut self, event: &MarketEvent) {
        let mut size = event.size;
        if self.crosses_spread(event.side, event.price) {
            size = self.execute_against_opposite_book(event);
            if size == 0 {
                return;
            }
        }

        let resting = RestingOrder::new(
            event.timestamp,
            event.order_id,
            size,
            event.price,
            event.side,
        );
        self.update_lofi(&resting);
        self.ladder_mut(event.side)
            .entry(event.price)
            .or_default()
            .push_back(resting);
        trace!(
            "book {}: resting {} {} id={} size={} @ {}",
            self.ticker, event.side, event.kind, event.order_id, size, event.price
        );
    }

    /// Partial cancellation: shrink the referenced order, dropping it
    /// (and its level) once nothing remains.
    fn apply_cancel(&mut self, event: &MarketEvent) {
        let best = self.same_side_best(event.side);

        let level_empty = {
            let Some(level) = self.ladder_mut(event.side).get_mut(&event.price) else {
                warn!("cancel: price {} not found on {} side: {event}", event.price, event.side);
                return;
            };
            let Some(order) = level.get_mut(event.order_id) else {
                warn!(
                    "cancel: order id {} not found at price {} on {} side: {event}",
                    event.order_id, event.price, event.side
                );
                return;
            };
            order.size = order.size.saturating_sub(event.size);
            if order.size == 0 {
                level.remove(event.order_id);
            }
            level.is_empty()
        };
        if level_empty {
            self.ladder_mut(event.side).remove(&event.price);
        }

        self.update_dofi(event.side, event.price, event.size, best);
    }

    /// Full deletion of a resting order.
    fn apply_delete(&mut self, event: &MarketEvent) {
        let best = self.same_side_best(event.side);

        let level_empty = {
            let Some(level) = self.ladder_mut(event.side).get_mut(&event.price) else {
                warn!("delete: price {} not found on {} side: {event}", event.price, event.side);
                return;
            };
            if level.remove(event.order_id).is_none() {
                warn!(
                    "delete: order id {} not found at price {} on {} side: {event}",
                    event.order_id, event.price, event.side
                );
                return;
            }
            level.is_empty()
        };
        if level_empty {
            self.ladder_mut(event.side).remove(&event.price);
        }

        self.update_dofi(event.side, event.price, event.size, best);
    }

    /// Execution against a visible resting order. Records a trade and
    /// classifies the flow as marketable when the order sat at the best.
    fn apply_visible_exec(&mut self, event: &MarketEvent) {
        let best = self.same_side_best(event.side);

        let level_empty = {
            let Some(level) = self.ladder_mut(event.side).get_mut(&event.price) else {
                warn!("vis_exec: price {} not found on {} side: {event}", event.price, event.side);
                return;
            };
            let Some(order) = level.get_mut(event.order_id) else {
                warn!(
                    "vis_exec: order id {} not found at price {} on {} side: {event}",
                    event.order_id, event.price, event.side
                );
                return;
            };
            order.size = order.size.saturating_sub(event.size);
            if order.size == 0 {
                level.remove(event.order_id);
            }
            level.is_empty()
        };
        if level_empty {
            self.ladder_mut(event.side).remove(&event.price);
        }

        if best == Some(event.price) {
            match event.side {
                Side::Bid => self.cum_ofi.mb.add(event.size),
                Side::Ask => self.cum_ofi.ma.add(event.size),
            }
        }
        self.record_trade(
            event.timestamp,
            TradeKind::VisExec,
            event.side,
            event.size,
            event.price,
            event.order_id,
        );
    }

    /// Execution of hidden liquidity: logged as a trade, no book change.
    fn apply_hidden_exec(&mut self, event: &MarketEvent) {
        self.record_trade(
            event.timestamp,
            TradeKind::HidExec,
            event.side,
            event.size,
            event.price,
            event.order_id,
        );
    }

    /// Best quote on the event's own side.
    fn same_side_best(&self, side: Side) -> Option<i64> {
        match side {
            Side::Bid => self.best_bid(),
            Side::Ask => self.best_ask(),
        }
    }

    /// Classify a limit addition. An order at or inside the same-side
    /// best counts; an empty same side counts as well (the order becomes
    /// the best by definition).
    fn update_lofi(&mut self, order: &RestingOrder) {
        match order.side {
            Side::Bid => {
                if self.best_bid().is_none_or(|best| order.price >= best) {
                    self.cum_ofi.lb.add(order.size);
                }
            }
            Side::Ask => {
                if self.best_ask().is_none_or(|best| order.price <= best) {
                    self.cum_ofi.la.add(order.size);
                }
            }
        }
    }

    /// Classify a cancellation/deletion: only reductions exactly at the
    /// pre-event best move the counters.
    fn update_dofi(&mut self, side: Side, price: i64, size: u64, pre_event_best: Option<i64>) {
        if pre_event_best == Some(price) {
            match side {
                Side::Bid => self.cum_ofi.db.add(size),
                Side::Ask => self.cum_ofi.da.add(size),
            }
        }
    }
}
