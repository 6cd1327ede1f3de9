//! Point-in-time book snapshots for observers and tests.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Qty, Side};
use crate::utils::current_time_millis;

use super::book::Book;

/// Aggregate state of one price level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub price: Price,
    pub total_qty: Qty,
    pub order_count: usize,
}

/// A copy of the book's aggregate state at a specific point in time.
///
/// Levels on both sides are listed best price first: bids descending, asks
/// ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Milliseconds since the UNIX epoch at capture time.
    pub timestamp: u64,
    pub bids: Vec<LevelSnapshot>,
    pub asks: Vec<LevelSnapshot>,
}

impl Book {
    /// Capture the top `depth` levels of each side.
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        let capture = |side: Side| -> Vec<LevelSnapshot> {
            self.ladder(side)
                .iter_best_first()
                .take(depth)
                .map(|(price, key)| {
                    let level = &self.levels[key];
                    LevelSnapshot {
                        price,
                        total_qty: level.total_qty,
                        order_count: level.len(),
                    }
                })
                .collect()
        };
        BookSnapshot {
            timestamp: current_time_millis(),
            bids: capture(Side::Buy),
            asks: capture(Side::Sell),
        }
    }
}

impl BookSnapshot {
    /// Best bid price and quantity.
    pub fn best_bid(&self) -> Option<(Price, Qty)> {
        self.bids.first().map(|level| (level.price, level.total_qty))
    }

    /// Best ask price and quantity.
    pub fn best_ask(&self) -> Option<(Price, Qty)> {
        self.asks.first().map(|level| (level.price, level.total_qty))
    }

    /// Best ask minus best bid, when both sides are populated.
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some(ask.value().saturating_sub(bid.value())),
            _ => None,
        }
    }

    /// Total visible quantity on the bid side.
    pub fn total_bid_volume(&self) -> Qty {
        self.bids
            .iter()
            .fold(Qty::ZERO, |acc, level| acc + level.total_qty)
    }

    /// Total visible quantity on the ask side.
    pub fn total_ask_volume(&self) -> Qty {
        self.asks
            .iter()
            .fold(Qty::ZERO, |acc, level| acc + level.total_qty)
    }
}
