//! # FIFO Limit Order Book Matching Engine
//!
//! A single-instrument limit order book with strict price-time priority
//! matching, driven by a stream of textual commands.
//!
//! ## Key Features
//!
//! - **Dual price-indexed ladders**: each side of the book is an ordered
//!   collection of price levels, each level a FIFO queue of resting orders.
//!
//! - **O(1) order handles**: orders and levels live in slab arenas linked by
//!   intrusive queue nodes, and an id index maps straight to an order's
//!   position, so cancel, modify and fill never search.
//!
//! - **Self-match prevention**: an aggressive order skips resting orders
//!   bearing its own id, which makes the modify protocol (match at the new
//!   terms, then reshape the original) safe.
//!
//! - **Time-in-force policy**: GFD remainders rest in the book, IOC
//!   remainders are discarded.
//!
//! - **Permissive interface**: malformed lines, duplicate adds and unknown
//!   cancels or modifies are silent no-ops. Only well-formed, actionable
//!   commands have effects.
//!
//! ## Command syntax
//!
//! ```text
//! BUY    <tif> <price> <qty> <order_id>
//! SELL   <tif> <price> <qty> <order_id>
//! CANCEL <order_id>
//! MODIFY <order_id> <side> <price> <qty>
//! PRINT
//! CLEAR
//! ```
//!
//! ## Example
//!
//! ```
//! use matchbook::{MatchingEngine, OrderId, Price, Qty, Side, TimeInForce};
//!
//! let mut engine = MatchingEngine::new();
//! engine.submit(
//!     Side::Buy,
//!     TimeInForce::Gfd,
//!     Price::new(1000),
//!     Qty::new(10),
//!     OrderId::from("order1"),
//! );
//! let trades = engine.submit(
//!     Side::Sell,
//!     TimeInForce::Gfd,
//!     Price::new(900),
//!     Qty::new(20),
//!     OrderId::from("order2"),
//! );
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].qty, Qty::new(10));
//! ```
//!
//! The book and engine are single-threaded and non-reentrant; the
//! [`command::run_threaded`] shell provides a producer/consumer wrapper that
//! feeds the engine a serialized command stream from a parsing thread.

pub mod command;
pub mod engine;
pub mod orderbook;
pub mod types;

mod utils;

pub use command::{Command, CommandProcessor};
pub use engine::MatchingEngine;
pub use orderbook::{Book, BookSnapshot, RestingOrder, Trade};
pub use types::{OrderId, Price, Qty, Side, TimeInForce};
pub use utils::current_time_millis;
