//! Per-side price ladder: an ordered map from price to level handle.
//!
//! `BTreeMap` gives ordered, deterministic iteration; "best" is the highest
//! price on the buy side and the lowest on the sell side.

use std::collections::BTreeMap;

use crate::types::{Price, Side};

use super::level::LevelKey;

#[derive(Debug, Clone)]
pub(crate) struct Ladder {
    side: Side,
    levels_by_price: BTreeMap<Price, LevelKey>,
}

impl Ladder {
    pub(crate) fn new(side: Side) -> Self {
        Self {
            side,
            levels_by_price: BTreeMap::new(),
        }
    }

    pub(crate) fn get(&self, price: Price) -> Option<LevelKey> {
        self.levels_by_price.get(&price).copied()
    }

    pub(crate) fn insert(&mut self, price: Price, key: LevelKey) {
        let previous = self.levels_by_price.insert(price, key);
        debug_assert!(previous.is_none(), "two levels at one price");
    }

    pub(crate) fn remove(&mut self, price: Price) -> Option<LevelKey> {
        self.levels_by_price.remove(&price)
    }

    /// Best price on this side: highest bid, lowest ask.
    pub(crate) fn best(&self) -> Option<Price> {
        match self.side {
            Side::Buy => self.levels_by_price.keys().next_back().copied(),
            Side::Sell => self.levels_by_price.keys().next().copied(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.levels_by_price.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.levels_by_price.is_empty()
    }

    /// Iterate levels from the best price outwards, the order an aggressive
    /// order on the opposite side consumes them.
    pub(crate) fn iter_best_first(&self) -> Box<dyn Iterator<Item = (Price, LevelKey)> + '_> {
        match self.side {
            Side::Buy => Box::new(
                self.levels_by_price
                    .iter()
                    .rev()
                    .map(|(price, key)| (*price, *key)),
            ),
            Side::Sell => Box::new(self.levels_by_price.iter().map(|(price, key)| (*price, *key))),
        }
    }

    /// Iterate levels from the highest price to the lowest, the order both
    /// sides are rendered in.
    pub(crate) fn iter_descending(&self) -> impl Iterator<Item = (Price, LevelKey)> + '_ {
        self.levels_by_price
            .iter()
            .rev()
            .map(|(price, key)| (*price, *key))
    }

    pub(crate) fn clear(&mut self) {
        self.levels_by_price.clear();
    }
}
