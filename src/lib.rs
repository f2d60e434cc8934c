//! # LOBSTER Limit Order Book Reconstruction
//!
//! An event-driven reconstruction engine for limit order books recorded
//! in the LOBSTER CSV schema, together with the quantitative features
//! derived from the reconstructed state: order flow imbalance (OFI),
//! per-level depth, midprice tracking, trade-log analytics and
//! meta-order / sweep detection.
//!
//! ## Key Components
//!
//! - **[`OrderBook`]**: a deterministic state machine over a two-sided
//!   price ladder with FIFO time priority inside each level. It handles
//!   the seven LOBSTER event types, including marketable limit orders
//!   that cross the spread and execute against resting liquidity, and it
//!   incrementally maintains six OFI counters classified against the
//!   pre-event top of book.
//!
//! - **Feature queries**: pure reads over the current state, covering
//!   spread, midprice, per-price and total depth, priority volume ahead of a
//!   hypothetical order, symmetric opposite-book depth, and elapsed-time
//!   measures.
//!
//! - **Trade log analytics**: every execution (visible, hidden, or
//!   aggressive-limit fill) is appended to a trade log that
//!   [`OrderBook::meta_orders`] groups into time-adjacent same-type runs
//!   and [`OrderBook::order_sweeps`] filters down to multi-level sweeps.
//!
//! - **[`replay`]**: CSV ingestion of LOBSTER message files, a
//!   [`ReplaySession`](replay::ReplaySession) that drives the book to
//!   arbitrary timestamps, verification against LOBSTER reference
//!   orderbook files, and a feature-export pipeline writing sampled
//!   features to CSV.
//!
//! ## Example
//!
//! ```
//! use lobster_book::{EventKind, MarketEvent, OrderBook, Side};
//!
//! let mut book = OrderBook::new("AAPL", 10, 1.0).unwrap();
//!
//! // A bid and an ask arrive.
//! book.process(&MarketEvent::new(34_200.1, EventKind::Submit, 1, 100, 585_000, Side::Bid))
//!     .unwrap();
//! book.process(&MarketEvent::new(34_200.2, EventKind::Submit, 2, 50, 585_200, Side::Ask))
//!     .unwrap();
//!
//! assert_eq!(book.best_bid(), Some(585_000));
//! assert_eq!(book.best_ask(), Some(585_200));
//! assert_eq!(book.mid_price(), Some(585_100.0));
//!
//! // A marketable bid lifts the ask and leaves the remainder resting.
//! book.process(&MarketEvent::new(34_200.3, EventKind::Submit, 3, 80, 585_200, Side::Bid))
//!     .unwrap();
//! assert_eq!(book.trade_log().len(), 1);
//! assert_eq!(book.best_bid(), Some(585_200));
//! assert!(book.best_ask().is_none());
//! ```
//!
//! ## Design Notes
//!
//! Processing is single-threaded and strictly sequential: events must
//! arrive with non-decreasing timestamps and each one is applied in full
//! before the next is accepted. The book holds no global state, so
//! independent books can be driven in parallel from separate sessions.
//! Ladders are ordered maps keyed by scaled integer price; each level is
//! an insertion-ordered queue, giving O(log P) best-price access and O(1)
//! in-level lookup by order id.

pub mod orderbook;
pub mod replay;

pub mod prelude;
mod utils;

pub use orderbook::{
    CumulativeOfi, EventKind, L2Level, L2Snapshot, L3Level, L3Order, L3Snapshot, MarketEvent,
    OfiPair, OrderBook, OrderBookError, PriceLevel, RestingOrder, Side, Trade, TradeKind,
};
pub use replay::{
    FeatureKind, FeatureRegistry, ReferenceLevel, ReplayError, ReplaySession,
    read_message_file, read_orderbook_file,
};
pub use utils::format_timestamp;
