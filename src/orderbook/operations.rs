//! Book operations: adding and cancelling resting orders.
//!
//! Both operations are permissive: a duplicate add or an unknown cancel is a
//! silent no-op that leaves the book untouched. Rejects are traced, never
//! surfaced.

use tracing::trace;

use crate::types::{OrderId, Price, Qty, Side};

use super::book::Book;
use super::level::OrderNode;

impl Book {
    /// Rest a new order at `(side, price)`, creating the level if needed.
    ///
    /// Returns `false` without mutating anything if an order with this id is
    /// already resting. Preconditions (checked upstream by the command
    /// parser): non-zero price and qty, non-empty id.
    pub fn add(&mut self, side: Side, order_id: OrderId, qty: Qty, price: Price) -> bool {
        debug_assert!(!price.is_zero() && !qty.is_zero() && !order_id.is_empty());
        if self.ids.contains_key(&order_id) {
            trace!(id = %order_id, "ignoring add with duplicate order id");
            return false;
        }

        let level_key = self.find_or_insert_level(side, price);
        let key = self
            .orders
            .insert(OrderNode::new(order_id.clone(), qty, level_key));
        self.levels[level_key].push_back(&mut self.orders, key);
        self.ids.insert(order_id, key);
        true
    }

    /// Remove a resting order by id, destroying its level if it empties.
    ///
    /// Returns `false` if no such order is resting; cancelling twice is
    /// equivalent to cancelling once.
    pub fn cancel(&mut self, order_id: &OrderId) -> bool {
        match self.ids.get(order_id) {
            Some(&key) => {
                self.remove_resting(key);
                true
            }
            None => {
                trace!(id = %order_id, "ignoring cancel of unknown order id");
                false
            }
        }
    }
}
