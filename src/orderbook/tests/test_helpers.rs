//! Shared constructors for order book unit tests.

use crate::orderbook::{EventKind, MarketEvent, OrderBook, RestingOrder, Side};

/// A book with tick size 1 and price scaling 0.01, ten visible levels.
#[allow(dead_code)]
pub fn test_book() -> OrderBook {
    OrderBook::with_price_scaling("TEST", 10, 1.0, 0.01).expect("valid test configuration")
}

#[allow(dead_code)]
pub fn submit(timestamp: f64, order_id: u64, size: u64, price: i64, side: Side) -> MarketEvent {
    MarketEvent::new(timestamp, EventKind::Submit, order_id, size, price, side)
}

#[allow(dead_code)]
pub fn cancel(timestamp: f64, order_id: u64, size: u64, price: i64, side: Side) -> MarketEvent {
    MarketEvent::new(timestamp, EventKind::Cancel, order_id, size, price, side)
}

#[allow(dead_code)]
pub fn delete(timestamp: f64, order_id: u64, price: i64, side: Side) -> MarketEvent {
    MarketEvent::new(timestamp, EventKind::Delete, order_id, 0, price, side)
}

#[allow(dead_code)]
pub fn vis_exec(timestamp: f64, order_id: u64, size: u64, price: i64, side: Side) -> MarketEvent {
    MarketEvent::new(timestamp, EventKind::VisibleExec, order_id, size, price, side)
}

#[allow(dead_code)]
pub fn hid_exec(timestamp: f64, order_id: u64, size: u64, price: i64, side: Side) -> MarketEvent {
    MarketEvent::new(timestamp, EventKind::HiddenExec, order_id, size, price, side)
}

/// A hypothetical order for the order-relative feature queries.
#[allow(dead_code)]
pub fn hypothetical(timestamp: f64, price: i64, side: Side) -> RestingOrder {
    RestingOrder::new(timestamp, 9_999, 1, price, side)
}
