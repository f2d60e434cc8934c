//! Order flow imbalance accumulators.
//!
//! Six paired counters classify top-of-book flow: passive limit additions
//! (`lb`/`la`), cancellations and deletions at the best (`db`/`da`), and
//! marketable activity removing liquidity from the best (`mb`/`ma`). Each
//! pair accumulates both shares and event counts since the last reset.
//! The update hooks live on the book (see `operations.rs`); the reference
//! price for every classification is the best quote *before* the event.

use serde::{Deserialize, Serialize};

/// One accumulated flow bucket: total shares and number of events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfiPair {
    /// Accumulated shares
    pub size: u64,
    /// Accumulated event count
    pub count: u64,
}

impl OfiPair {
    /// Add one event of `size` shares to this bucket.
    pub fn add(&mut self, size: u64) {
        self.size += size;
        self.count += 1;
    }

    /// Zero both fields.
    pub fn reset(&mut self) {
        *self = OfiPair::default();
    }
}

/// Cumulative order flow imbalance counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeOfi {
    /// Limit additions at or better than the best bid
    pub lb: OfiPair,
    /// Limit additions at or better than the best ask
    pub la: OfiPair,
    /// Cancellations/deletions at the best bid
    pub db: OfiPair,
    /// Cancellations/deletions at the best ask
    pub da: OfiPair,
    /// Marketable flow removing best-bid liquidity
    pub mb: OfiPair,
    /// Marketable flow removing best-ask liquidity
    pub ma: OfiPair,
}

impl CumulativeOfi {
    /// Fresh, all-zero counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all six pairs.
    pub fn reset(&mut self) {
        *self = CumulativeOfi::default();
    }

    /// Signed share imbalance: `lb - db + mb - la + da - ma`.
    #[must_use]
    pub fn size_ofi(&self) -> i64 {
        self.lb.size as i64 - self.db.size as i64 + self.mb.size as i64 - self.la.size as i64
            + self.da.size as i64
            - self.ma.size as i64
    }

    /// Signed event-count imbalance: same combination over counts.
    #[must_use]
    pub fn count_ofi(&self) -> i64 {
        self.lb.count as i64 - self.db.count as i64 + self.mb.count as i64 - self.la.count as i64
            + self.da.count as i64
            - self.ma.count as i64
    }
}
