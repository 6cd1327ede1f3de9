//! Price-time priority matching.
//!
//! An aggressive order walks the opposite ladder from the best price
//! outwards and each level's queue oldest-first. The walk only collects; the
//! fill pass afterwards applies quantity reductions and removals, so trade
//! records handed back to callers hold copies, never live handles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{OrderId, Price, Qty, Side};

use super::book::Book;
use super::level::OrderKey;

/// One match between an aggressive order and a resting passive order.
///
/// Both quantity columns of the wire format carry the matched quantity; the
/// passive price is the resting level's price, the aggressive price the
/// incoming order's limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub passive_order_id: OrderId,
    pub passive_price: Price,
    pub aggressive_order_id: OrderId,
    pub aggressive_price: Price,
    pub qty: Qty,
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRADE {} {} {} {} {} {}",
            self.passive_order_id,
            self.passive_price,
            self.qty,
            self.aggressive_order_id,
            self.aggressive_price,
            self.qty
        )
    }
}

/// A passive order's share of a match, kept only between the walk and the
/// fill pass within one `match_order` call.
struct PendingFill {
    key: OrderKey,
    qty_before: Qty,
    matched: Qty,
}

impl Book {
    /// Match an aggressive order against the opposite side of the book.
    ///
    /// Appends one [`Trade`] per passive order consumed, in strict
    /// best-price-then-FIFO order, then applies the fills: fully consumed
    /// passive orders are removed, a partially consumed one is reduced in
    /// place and keeps the front of its queue. A resting order whose id
    /// equals the aggressor's is skipped without trading, which is what
    /// keeps a modify from crossing with its own pre-modify self.
    ///
    /// Returns the aggressor's unfilled remainder. The aggressor itself is
    /// never added to the book here.
    pub fn match_order(
        &mut self,
        side: Side,
        order_id: &OrderId,
        qty: Qty,
        price: Price,
        trades: &mut Vec<Trade>,
    ) -> Qty {
        let mut leaves = qty;
        let mut fills: Vec<PendingFill> = Vec::new();

        let opposite = self.ladder(side.opposite());
        'ladder: for (level_price, level_key) in opposite.iter_best_first() {
            let matchable = match side {
                Side::Buy => price >= level_price,
                Side::Sell => price <= level_price,
            };
            if !matchable {
                break;
            }

            for key in self.levels[level_key].iter(&self.orders) {
                let node = &self.orders[key];
                if node.id == *order_id {
                    // Self-match prevention: skip without consuming.
                    continue;
                }

                let matched = leaves.min(node.qty);
                trades.push(Trade {
                    passive_order_id: node.id.clone(),
                    passive_price: level_price,
                    aggressive_order_id: order_id.clone(),
                    aggressive_price: price,
                    qty: matched,
                });
                fills.push(PendingFill {
                    key,
                    qty_before: node.qty,
                    matched,
                });

                leaves -= matched;
                if leaves.is_zero() {
                    break 'ladder;
                }
            }
        }

        self.fill_orders(&fills);
        leaves
    }

    /// Apply collected fills: cancel fully filled passive orders, reduce
    /// partially filled ones in place.
    fn fill_orders(&mut self, fills: &[PendingFill]) {
        for fill in fills {
            debug_assert_eq!(self.orders[fill.key].qty, fill.qty_before);
            let leaves_after = fill.qty_before - fill.matched;
            if leaves_after.is_zero() {
                self.remove_resting(fill.key);
            } else {
                let level_key = self.orders[fill.key].level;
                self.levels[level_key].set_order_qty(&mut self.orders, fill.key, leaves_after);
            }
        }
    }
}
