//! Arena-backed price levels with intrusive FIFO queues.
//!
//! Orders live in a `Slab` arena and are linked into their level's queue by
//! prev/next keys, so appending, erasing at an arbitrary position and
//! splicing to the tail are all O(1) and never invalidate other handles.

use slab::Slab;

use crate::types::{OrderId, Price, Qty, Side};

/// Handle to an order node inside the order arena.
pub(crate) type OrderKey = usize;

/// Handle to a level inside the level arena.
pub(crate) type LevelKey = usize;

/// A resting order plus its position in the book: the level that contains it
/// and the neighbouring queue links.
#[derive(Debug, Clone)]
pub(crate) struct OrderNode {
    pub(crate) id: OrderId,
    pub(crate) qty: Qty,
    pub(crate) level: LevelKey,
    prev: Option<OrderKey>,
    next: Option<OrderKey>,
}

impl OrderNode {
    pub(crate) fn new(id: OrderId, qty: Qty, level: LevelKey) -> Self {
        Self {
            id,
            qty,
            level,
            prev: None,
            next: None,
        }
    }
}

/// All resting orders at one price on one side, in arrival order.
///
/// `total_qty` is maintained incrementally and always equals the sum of the
/// queued orders' quantities. An empty level is removed from its ladder
/// immediately, so a level reachable from a ladder is never empty.
#[derive(Debug, Clone)]
pub(crate) struct Level {
    pub(crate) side: Side,
    pub(crate) price: Price,
    pub(crate) total_qty: Qty,
    head: Option<OrderKey>,
    tail: Option<OrderKey>,
    len: usize,
}

impl Level {
    pub(crate) fn new(side: Side, price: Price) -> Self {
        Self {
            side,
            price,
            total_qty: Qty::ZERO,
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append an order at the tail of the queue. The node's `level` field
    /// must already point at this level.
    pub(crate) fn push_back(&mut self, orders: &mut Slab<OrderNode>, key: OrderKey) {
        let qty = {
            let node = &mut orders[key];
            node.prev = self.tail;
            node.next = None;
            node.qty
        };
        match self.tail {
            Some(tail) => orders[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.total_qty += qty;
        self.len += 1;
    }

    /// Detach an order from the queue and subtract its quantity from the
    /// level total. The node itself stays in the arena; the caller decides
    /// whether to free or re-link it.
    pub(crate) fn unlink(&mut self, orders: &mut Slab<OrderNode>, key: OrderKey) {
        let (prev, next, qty) = {
            let node = &orders[key];
            (node.prev, node.next, node.qty)
        };
        self.detach(orders, key, prev, next);
        self.total_qty -= qty;
        self.len -= 1;
    }

    /// Splice an order to the tail of the queue, losing its time priority.
    /// Quantity and level total are unchanged.
    pub(crate) fn move_to_back(&mut self, orders: &mut Slab<OrderNode>, key: OrderKey) {
        if self.tail == Some(key) {
            return;
        }
        let (prev, next) = {
            let node = &orders[key];
            (node.prev, node.next)
        };
        self.detach(orders, key, prev, next);
        let node = &mut orders[key];
        node.prev = self.tail;
        node.next = None;
        match self.tail {
            Some(tail) => orders[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Replace an order's quantity in place, adjusting the level total. The
    /// order keeps its queue position.
    pub(crate) fn set_order_qty(&mut self, orders: &mut Slab<OrderNode>, key: OrderKey, qty: Qty) {
        debug_assert!(!qty.is_zero());
        let node = &mut orders[key];
        let old = node.qty;
        node.qty = qty;
        self.total_qty -= old;
        self.total_qty += qty;
    }

    /// Iterate order handles oldest-first.
    pub(crate) fn iter<'a>(&self, orders: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            orders,
            cur: self.head,
        }
    }

    fn detach(
        &mut self,
        orders: &mut Slab<OrderNode>,
        key: OrderKey,
        prev: Option<OrderKey>,
        next: Option<OrderKey>,
    ) {
        match prev {
            Some(prev) => orders[prev].next = next,
            None => {
                debug_assert_eq!(self.head, Some(key));
                self.head = next;
            }
        }
        match next {
            Some(next) => orders[next].prev = prev,
            None => {
                debug_assert_eq!(self.tail, Some(key));
                self.tail = prev;
            }
        }
        let node = &mut orders[key];
        node.prev = None;
        node.next = None;
    }
}

pub(crate) struct LevelIter<'a> {
    orders: &'a Slab<OrderNode>,
    cur: Option<OrderKey>,
}

impl Iterator for LevelIter<'_> {
    type Item = OrderKey;

    fn next(&mut self) -> Option<OrderKey> {
        let key = self.cur?;
        self.cur = self.orders[key].next;
        Some(key)
    }
}
