//! A single price level: a FIFO queue of resting orders.

use super::event::RestingOrder;
use indexmap::IndexMap;

/// The orders resting at one price, in strict arrival order.
///
/// Keyed by order id for O(1) lookup while preserving insertion order,
/// which is the level's time priority: the front of the queue is the
/// oldest order and is matched first by crossing submits.
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    orders: IndexMap<u64, RestingOrder>,
}

impl PriceLevel {
    /// Create an empty level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: IndexMap::new(),
        }
    }

    /// Append an order at the back of the queue (lowest time priority).
    pub fn push_back(&mut self, order: RestingOrder) {
        self.orders.insert(order.order_id, order);
    }

    /// Look up an order by id.
    #[must_use]
    pub fn get(&self, order_id: u64) -> Option<&RestingOrder> {
        self.orders.get(&order_id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, order_id: u64) -> Option<&mut RestingOrder> {
        self.orders.get_mut(&order_id)
    }

    /// Remove an order by id, preserving the arrival order of the rest.
    pub fn remove(&mut self, order_id: u64) -> Option<RestingOrder> {
        self.orders.shift_remove(&order_id)
    }

    /// The oldest order at this level, if any.
    #[must_use]
    pub fn front(&self) -> Option<&RestingOrder> {
        self.orders.get_index(0).map(|(_, order)| order)
    }

    /// Mutable access to the oldest order at this level.
    pub fn front_mut(&mut self) -> Option<&mut RestingOrder> {
        self.orders.get_index_mut(0).map(|(_, order)| order)
    }

    /// Remove and return the oldest order.
    pub fn pop_front(&mut self) -> Option<RestingOrder> {
        self.orders.shift_remove_index(0).map(|(_, order)| order)
    }

    /// The most recently arrived order at this level, if any.
    #[must_use]
    pub fn back(&self) -> Option<&RestingOrder> {
        self.orders.last().map(|(_, order)| order)
    }

    /// Sum of resting sizes at this level.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.orders.values().map(|order| order.size).sum()
    }

    /// Number of resting orders at this level.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// True when no orders rest here. The book removes empty levels, so
    /// this is only observed transiently inside event handlers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Iterate orders in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &RestingOrder> {
        self.orders.values()
    }
}
