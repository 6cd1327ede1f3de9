//! Line-command grammar for driving the engine.
//!
//! One command per line, whitespace-separated tokens:
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
//! A line that fails to parse (unknown keyword, bad token, zero price or
//! qty, missing or extra tokens) is discarded by the processor without any
//! output or state change.

pub mod processor;

use std::fmt;
use std::str::FromStr;

use crate::types::{InvalidToken, OrderId, Price, Qty, Side, TimeInForce};

pub use processor::{run_threaded, CommandProcessor};

/// A fully validated command, ready for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit {
        side: Side,
        tif: TimeInForce,
        price: Price,
        qty: Qty,
        order_id: OrderId,
    },
    Cancel {
        order_id: OrderId,
    },
    Modify {
        order_id: OrderId,
        side: Side,
        price: Price,
        qty: Qty,
    },
    Print,
    Clear,
}

/// Why a command line was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line contained no tokens at all.
    Empty,
    /// The leading keyword is not a known command.
    UnknownCommand(String),
    /// A required token is missing.
    Missing(&'static str),
    /// A side or tif token did not match any known value.
    Invalid(InvalidToken),
    /// A price or qty token is not an unsigned integer.
    Number {
        field: &'static str,
        token: String,
    },
    ZeroPrice,
    ZeroQty,
    /// Tokens were left over after a complete command.
    Trailing(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command line"),
            ParseError::UnknownCommand(keyword) => write!(f, "unknown command {:?}", keyword),
            ParseError::Missing(field) => write!(f, "missing {} token", field),
            ParseError::Invalid(err) => err.fmt(f),
            ParseError::Number { field, token } => {
                write!(f, "{} is not an unsigned integer: {:?}", field, token)
            }
            ParseError::ZeroPrice => write!(f, "price must be non-zero"),
            ParseError::ZeroQty => write!(f, "qty must be non-zero"),
            ParseError::Trailing(token) => write!(f, "unexpected trailing token {:?}", token),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<InvalidToken> for ParseError {
    fn from(err: InvalidToken) -> Self {
        ParseError::Invalid(err)
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or(ParseError::Empty)?;

        let command = match keyword {
            "BUY" | "SELL" => {
                let side = if keyword == "BUY" { Side::Buy } else { Side::Sell };
                let tif = next_token(&mut tokens, "tif")?.parse::<TimeInForce>()?;
                let price = parse_price(next_token(&mut tokens, "price")?)?;
                let qty = parse_qty(next_token(&mut tokens, "qty")?)?;
                let order_id = OrderId::from(next_token(&mut tokens, "order id")?);
                Command::Submit {
                    side,
                    tif,
                    price,
                    qty,
                    order_id,
                }
            }
            "CANCEL" => Command::Cancel {
                order_id: OrderId::from(next_token(&mut tokens, "order id")?),
            },
            "MODIFY" => {
                let order_id = OrderId::from(next_token(&mut tokens, "order id")?);
                let side = next_token(&mut tokens, "side")?.parse::<Side>()?;
                let price = parse_price(next_token(&mut tokens, "price")?)?;
                let qty = parse_qty(next_token(&mut tokens, "qty")?)?;
                Command::Modify {
                    order_id,
                    side,
                    price,
                    qty,
                }
            }
            "PRINT" => Command::Print,
            "CLEAR" => Command::Clear,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = tokens.next() {
            return Err(ParseError::Trailing(extra.to_string()));
        }
        Ok(command)
    }
}

fn next_token<'a>(
    tokens: &mut std::str::SplitWhitespace<'a>,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    tokens.next().ok_or(ParseError::Missing(field))
}

fn parse_price(token: &str) -> Result<Price, ParseError> {
    let price = token.parse::<Price>().map_err(|_| ParseError::Number {
        field: "price",
        token: token.to_string(),
    })?;
    if price.is_zero() {
        return Err(ParseError::ZeroPrice);
    }
    Ok(price)
}

fn parse_qty(token: &str) -> Result<Qty, ParseError> {
    let qty = token.parse::<Qty>().map_err(|_| ParseError::Number {
        field: "qty",
        token: token.to_string(),
    })?;
    if qty.is_zero() {
        return Err(ParseError::ZeroQty);
    }
    Ok(qty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cmd: Command = "BUY GFD 1000 10 order1".parse().unwrap();
        assert_eq!(
            cmd,
            Command::Submit {
                side: Side::Buy,
                tif: TimeInForce::Gfd,
                price: Price::new(1000),
                qty: Qty::new(10),
                order_id: OrderId::from("order1"),
            }
        );

        let cmd: Command = "SELL IOC 900 5 o-2".parse().unwrap();
        assert_eq!(
            cmd,
            Command::Submit {
                side: Side::Sell,
                tif: TimeInForce::Ioc,
                price: Price::new(900),
                qty: Qty::new(5),
                order_id: OrderId::from("o-2"),
            }
        );
    }

    #[test]
    fn test_parse_cancel_modify_print_clear() {
        assert_eq!(
            "CANCEL order1".parse::<Command>().unwrap(),
            Command::Cancel {
                order_id: OrderId::from("order1")
            }
        );
        assert_eq!(
            "MODIFY order1 SELL 1000 20".parse::<Command>().unwrap(),
            Command::Modify {
                order_id: OrderId::from("order1"),
                side: Side::Sell,
                price: Price::new(1000),
                qty: Qty::new(20),
            }
        );
        assert_eq!("PRINT".parse::<Command>().unwrap(), Command::Print);
        assert_eq!("CLEAR".parse::<Command>().unwrap(), Command::Clear);
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        assert!("  BUY  GFD  1000  10  order1 ".parse::<Command>().is_ok());
    }

    #[test]
    fn test_parse_rejects_zero_price_and_qty() {
        assert_eq!(
            "BUY GFD 0 10 order1".parse::<Command>(),
            Err(ParseError::ZeroPrice)
        );
        assert_eq!(
            "BUY GFD 1000 0 order1".parse::<Command>(),
            Err(ParseError::ZeroQty)
        );
        assert_eq!(
            "MODIFY order1 BUY 0 10".parse::<Command>(),
            Err(ParseError::ZeroPrice)
        );
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert!(matches!(
            "BUY GFD abc 10 order1".parse::<Command>(),
            Err(ParseError::Number { field: "price", .. })
        ));
        assert!(matches!(
            "BUY GFD 1000 -3 order1".parse::<Command>(),
            Err(ParseError::Number { field: "qty", .. })
        ));
        assert!(matches!(
            "BUY FOK 1000 10 order1".parse::<Command>(),
            Err(ParseError::Invalid(_))
        ));
        assert!(matches!(
            "MODIFY order1 HOLD 1000 10".parse::<Command>(),
            Err(ParseError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert_eq!(
            "BUY GFD 1000 10".parse::<Command>(),
            Err(ParseError::Missing("order id"))
        );
        assert_eq!("CANCEL".parse::<Command>(), Err(ParseError::Missing("order id")));
        assert_eq!(
            "PRINT now".parse::<Command>(),
            Err(ParseError::Trailing("now".to_string()))
        );
        assert_eq!("".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_rejects_unknown_keyword() {
        assert_eq!(
            "HOLD order1".parse::<Command>(),
            Err(ParseError::UnknownCommand("HOLD".to_string()))
        );
    }
}
