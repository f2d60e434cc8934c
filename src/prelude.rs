//! Prelude module that re-exports commonly used types.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use lobster_book::prelude::*;
//! ```

// Core order book types
pub use crate::orderbook::{
    EventKind, MarketEvent, OrderBook, OrderBookError, RestingOrder, Side,
};

// OFI accumulators
pub use crate::orderbook::{CumulativeOfi, OfiPair};

// Trade log types
pub use crate::orderbook::{Trade, TradeKind};

// Snapshot types
pub use crate::orderbook::{L2Level, L2Snapshot, L3Level, L3Order, L3Snapshot};

// Replay layer
pub use crate::replay::{
    FeatureKind, FeatureRegistry, ReferenceLevel, ReplayError, ReplaySession,
    read_message_file, read_orderbook_file,
};

// Utility functions
pub use crate::utils::format_timestamp;
