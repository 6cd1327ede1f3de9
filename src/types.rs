//! Scalar domain types shared by the book, the engine and the command layer.
//!
//! Prices and quantities are unsigned 64-bit integers behind newtypes so the
//! two cannot be mixed up at call sites; zero means "invalid/absent" for
//! both and never appears inside the book. Order ids are the client-supplied
//! tokens carried on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A token that failed to parse as the named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidToken {
    field: &'static str,
    token: String,
}

impl InvalidToken {
    pub(crate) fn new(field: &'static str, token: &str) -> Self {
        Self {
            field,
            token: token.to_string(),
        }
    }
}

impl fmt::Display for InvalidToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} token: {:?}", self.field, self.token)
    }
}

impl std::error::Error for InvalidToken {}

/// Limit price in ticks. Zero is reserved for "invalid/absent".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn new(value: u64) -> Self {
        Price(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Price {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Price)
    }
}

/// Order quantity. Zero is reserved for "invalid/absent"; resting orders
/// always have a positive quantity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Qty(u64);

impl Qty {
    pub const ZERO: Qty = Qty(0);

    pub const fn new(value: u64) -> Self {
        Qty(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Qty {
    type Output = Qty;

    fn add(self, rhs: Qty) -> Qty {
        Qty(self.0 + rhs.0)
    }
}

impl AddAssign for Qty {
    fn add_assign(&mut self, rhs: Qty) {
        self.0 += rhs.0;
    }
}

impl Sub for Qty {
    type Output = Qty;

    fn sub(self, rhs: Qty) -> Qty {
        debug_assert!(self.0 >= rhs.0, "quantity underflow");
        Qty(self.0 - rhs.0)
    }
}

impl SubAssign for Qty {
    fn sub_assign(&mut self, rhs: Qty) {
        debug_assert!(self.0 >= rhs.0, "quantity underflow");
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Qty {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Qty)
    }
}

/// Client-supplied order identifier. An arbitrary non-empty token; the book
/// never generates ids of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        OrderId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        OrderId(s.to_string())
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        OrderId(s)
    }
}

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an aggressive order matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = InvalidToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(InvalidToken::new("side", other)),
        }
    }
}

/// Time-in-force policy applied by the matching engine after the match step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good For Day: any unfilled remainder rests in the book.
    Gfd,
    /// Immediate Or Cancel: any unfilled remainder is discarded.
    Ioc,
}

impl TimeInForce {
    /// Whether the unfilled remainder is discarded instead of rested.
    pub fn is_immediate(self) -> bool {
        matches!(self, TimeInForce::Ioc)
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInForce::Gfd => f.write_str("GFD"),
            TimeInForce::Ioc => f.write_str("IOC"),
        }
    }
}

impl FromStr for TimeInForce {
    type Err = InvalidToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GFD" => Ok(TimeInForce::Gfd),
            "IOC" => Ok(TimeInForce::Ioc),
            other => Err(InvalidToken::new("tif", other)),
        }
    }
}
