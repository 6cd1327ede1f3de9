//! Time-in-force policy layered on top of [`Book::match_order`].
//!
//! The engine owns the book and a reusable trade buffer. Every entry point
//! clears the buffer, so `trades()` always describes the most recent
//! operation only.

use tracing::trace;

use crate::orderbook::{Book, Trade};
use crate::types::{OrderId, Price, Qty, Side, TimeInForce};

pub struct MatchingEngine {
    book: Book,
    trades: Vec<Trade>,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            book: Book::new(),
            trades: Vec::with_capacity(1024),
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Trades produced by the most recent `submit` or `modify`.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Submit an aggressive order: match it against the opposite side, then
    /// rest the remainder for GFD or discard it for IOC.
    ///
    /// An id already resting in the book is rejected outright, before the
    /// match step, so a duplicate submission can neither trade nor rest.
    pub fn submit(
        &mut self,
        side: Side,
        tif: TimeInForce,
        price: Price,
        qty: Qty,
        order_id: OrderId,
    ) -> &[Trade] {
        self.trades.clear();
        if self.book.contains(&order_id) {
            trace!(id = %order_id, "ignoring submit with duplicate order id");
            return &self.trades;
        }

        let leaves = self
            .book
            .match_order(side, &order_id, qty, price, &mut self.trades);
        if !leaves.is_zero() && !tif.is_immediate() {
            self.book.add(side, order_id, leaves, price);
        }
        &self.trades
    }

    /// Cancel a resting order; unknown ids are ignored.
    pub fn cancel(&mut self, order_id: &OrderId) {
        self.book.cancel(order_id);
    }

    /// Modify a resting order to new terms, matching first.
    ///
    /// The match runs at the *new* side and price, which is how a modify
    /// that crosses the book generates trades; self-match prevention keeps
    /// the pre-modify copy out of its own match. If the new terms fill
    /// completely, the original order is cancelled; otherwise the original
    /// is reshaped to the unfilled remainder.
    pub fn modify(&mut self, order_id: &OrderId, side: Side, price: Price, qty: Qty) -> &[Trade] {
        self.trades.clear();
        if !self.book.contains(order_id) {
            trace!(id = %order_id, "ignoring modify of unknown order id");
            return &self.trades;
        }

        let leaves = self
            .book
            .match_order(side, order_id, qty, price, &mut self.trades);
        if leaves.is_zero() {
            self.book.cancel(order_id);
        } else {
            self.book.modify(side, order_id, leaves, price);
        }
        &self.trades
    }

    /// Drop the whole book. Emits nothing.
    pub fn clear(&mut self) {
        self.trades.clear();
        self.book.clear();
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
