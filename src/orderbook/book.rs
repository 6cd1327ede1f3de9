//! Core book state: both price ladders, the order arenas and the id index.

use std::collections::HashMap;
use std::fmt;

use slab::Slab;
use tracing::trace;

use crate::types::{OrderId, Price, Qty, Side};

use super::ladder::Ladder;
use super::level::{Level, LevelKey, OrderKey, OrderNode};

/// A two-sided limit order book with price-time priority.
///
/// The book owns every level and order reachable from it. Orders are held in
/// a slab arena and linked into per-price FIFO queues; `ids` maps an order id
/// straight to its arena handle so cancel and modify never search.
pub struct Book {
    pub(super) orders: Slab<OrderNode>,
    pub(super) levels: Slab<Level>,
    pub(super) bids: Ladder,
    pub(super) asks: Ladder,
    pub(super) ids: HashMap<OrderId, OrderKey>,
}

/// An owned copy of one resting order, safe to hold across mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestingOrder {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub qty: Qty,
}

impl Book {
    pub fn new() -> Self {
        Self {
            orders: Slab::new(),
            levels: Slab::new(),
            bids: Ladder::new(Side::Buy),
            asks: Ladder::new(Side::Sell),
            ids: HashMap::new(),
        }
    }

    /// Best (highest) bid price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best()
    }

    /// Best (lowest) ask price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best()
    }

    /// Best ask minus best bid, when both sides are populated.
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.value().saturating_sub(bid.value())),
            _ => None,
        }
    }

    /// Look up a resting order by id.
    pub fn order(&self, order_id: &OrderId) -> Option<RestingOrder> {
        let &key = self.ids.get(order_id)?;
        let node = &self.orders[key];
        let level = &self.levels[node.level];
        Some(RestingOrder {
            order_id: node.id.clone(),
            side: level.side,
            price: level.price,
            qty: node.qty,
        })
    }

    /// Whether an order with this id is resting in the book.
    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.ids.contains_key(order_id)
    }

    /// Number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of price levels on one side.
    pub fn level_count(&self, side: Side) -> usize {
        self.ladder(side).len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Every resting order on one side, best level first, oldest first
    /// within a level.
    pub fn all_orders(&self, side: Side) -> Vec<RestingOrder> {
        let mut all = Vec::new();
        for (price, key) in self.ladder(side).iter_best_first() {
            let level = &self.levels[key];
            for order in level.iter(&self.orders) {
                let node = &self.orders[order];
                all.push(RestingOrder {
                    order_id: node.id.clone(),
                    side,
                    price,
                    qty: node.qty,
                });
            }
        }
        all
    }

    /// Aggregate quantity per level on one side, best price first.
    pub fn depth(&self, side: Side) -> Vec<(Price, Qty)> {
        self.ladder(side)
            .iter_best_first()
            .map(|(price, key)| (price, self.levels[key].total_qty))
            .collect()
    }

    /// Drop every level on both sides and empty the id index.
    pub fn clear(&mut self) {
        trace!("clearing book");
        self.orders.clear();
        self.levels.clear();
        self.bids.clear();
        self.asks.clear();
        self.ids.clear();
    }

    pub(super) fn ladder(&self, side: Side) -> &Ladder {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(super) fn ladder_mut(&mut self, side: Side) -> &mut Ladder {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Level handle for `(side, price)`, creating an empty level if absent.
    pub(super) fn find_or_insert_level(&mut self, side: Side, price: Price) -> LevelKey {
        if let Some(key) = self.ladder(side).get(price) {
            return key;
        }
        let key = self.levels.insert(Level::new(side, price));
        self.ladder_mut(side).insert(price, key);
        key
    }

    /// Remove a resting order entirely: out of its level queue, out of the
    /// arena, out of the id index, destroying the level if it empties.
    pub(super) fn remove_resting(&mut self, key: OrderKey) {
        let level_key = self.orders[key].level;
        let (side, price, emptied) = {
            let level = &mut self.levels[level_key];
            level.unlink(&mut self.orders, key);
            (level.side, level.price, level.is_empty())
        };
        if emptied {
            self.levels.remove(level_key);
            self.ladder_mut(side).remove(price);
        }
        let node = self.orders.remove(key);
        let removed = self.ids.remove(&node.id);
        debug_assert!(removed.is_some(), "resting order missing from id index");
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the book in the PRINT wire format: both sides listed from the
/// highest price to the lowest, headers always present.
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SELL:")?;
        for (price, key) in self.asks.iter_descending() {
            writeln!(f, "{} {}", price, self.levels[key].total_qty)?;
        }
        writeln!(f, "BUY:")?;
        for (price, key) in self.bids.iter_descending() {
            writeln!(f, "{} {}", price, self.levels[key].total_qty)?;
        }
        Ok(())
    }
}
