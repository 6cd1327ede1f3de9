//! In-place order modification.
//!
//! A modify at the order's current side and price with its current quantity
//! is a no-op that keeps queue position. Any other same-level modify
//! re-quantities the order and sends it to the tail of its queue. A modify
//! that changes side or price relocates the node to the destination level's
//! tail, which is a queue splice rather than a cancel-and-re-add: the arena
//! node and the id-index entry survive, only the links change.

use tracing::trace;

use crate::types::{OrderId, Price, Qty, Side};

use super::book::Book;

impl Book {
    /// Reshape a resting order to `(side, price, qty)`.
    ///
    /// Returns `false` if no order with this id is resting. Modification by
    /// itself never trades; the engine runs its match step before calling
    /// this.
    pub fn modify(&mut self, side: Side, order_id: &OrderId, qty: Qty, price: Price) -> bool {
        debug_assert!(!price.is_zero() && !qty.is_zero());
        let Some(&key) = self.ids.get(order_id) else {
            trace!(id = %order_id, "ignoring modify of unknown order id");
            return false;
        };

        let level_key = self.orders[key].level;
        let (cur_side, cur_price) = {
            let level = &self.levels[level_key];
            (level.side, level.price)
        };

        if cur_side == side && cur_price == price {
            if self.orders[key].qty == qty {
                // Identical terms: nothing changes, priority kept.
                return true;
            }
            let level = &mut self.levels[level_key];
            level.set_order_qty(&mut self.orders, key, qty);
            level.move_to_back(&mut self.orders, key);
        } else {
            let emptied = {
                let level = &mut self.levels[level_key];
                level.unlink(&mut self.orders, key);
                level.is_empty()
            };
            if emptied {
                self.levels.remove(level_key);
                self.ladder_mut(cur_side).remove(cur_price);
            }

            let dest = self.find_or_insert_level(side, price);
            {
                let node = &mut self.orders[key];
                node.qty = qty;
                node.level = dest;
            }
            self.levels[dest].push_back(&mut self.orders, key);
        }
        true
    }
}
