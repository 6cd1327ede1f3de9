use crate::orderbook::Book;
use crate::types::{OrderId, Price, Qty, Side};

fn id(s: &str) -> OrderId {
    OrderId::from(s)
}

#[test]
fn test_add_creates_level_and_indexes_order() {
    let mut book = Book::new();
    assert!(book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000)));

    let resting = book.order(&id("order1")).unwrap();
    assert_eq!(resting.side, Side::Buy);
    assert_eq!(resting.price, Price::new(1000));
    assert_eq!(resting.qty, Qty::new(10));

    assert_eq!(book.order_count(), 1);
    assert_eq!(book.level_count(Side::Buy), 1);
    assert_eq!(book.best_bid(), Some(Price::new(1000)));
}

#[test]
fn test_add_aggregates_at_one_level() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));
    book.add(Side::Buy, id("order2"), Qty::new(20), Price::new(1000));

    assert_eq!(book.level_count(Side::Buy), 1);
    assert_eq!(
        book.depth(Side::Buy),
        vec![(Price::new(1000), Qty::new(30))]
    );
}

#[test]
fn test_add_duplicate_id_is_rejected_without_mutation() {
    let mut book = Book::new();
    assert!(book.add(Side::Buy, id("order1"), Qty::new(5), Price::new(900)));
    assert!(!book.add(Side::Buy, id("order1"), Qty::new(5), Price::new(900)));
    assert!(!book.add(Side::Sell, id("order1"), Qty::new(7), Price::new(950)));

    assert_eq!(book.order_count(), 1);
    assert_eq!(book.order(&id("order1")).unwrap().qty, Qty::new(5));
    assert!(book.ladder(Side::Sell).is_empty());
}

#[test]
fn test_cancel_removes_order_and_empty_level() {
    let mut book = Book::new();
    book.add(Side::Sell, id("order1"), Qty::new(10), Price::new(1100));

    assert!(book.cancel(&id("order1")));
    assert!(book.is_empty());
    assert_eq!(book.level_count(Side::Sell), 0);
    assert_eq!(book.best_ask(), None);
}

#[test]
fn test_cancel_keeps_level_with_remaining_orders() {
    let mut book = Book::new();
    book.add(Side::Sell, id("order1"), Qty::new(10), Price::new(1100));
    book.add(Side::Sell, id("order2"), Qty::new(15), Price::new(1100));

    assert!(book.cancel(&id("order1")));
    assert_eq!(book.level_count(Side::Sell), 1);
    assert_eq!(
        book.depth(Side::Sell),
        vec![(Price::new(1100), Qty::new(15))]
    );
}

#[test]
fn test_cancel_unknown_is_noop() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));

    assert!(!book.cancel(&id("ghost")));
    assert_eq!(book.order_count(), 1);
}

#[test]
fn test_cancel_is_idempotent() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));

    assert!(book.cancel(&id("order1")));
    assert!(!book.cancel(&id("order1")));
    assert!(book.is_empty());
}

#[test]
fn test_add_then_cancel_restores_prior_state() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));
    let depth_before = book.depth(Side::Buy);

    book.add(Side::Buy, id("order2"), Qty::new(20), Price::new(1005));
    book.cancel(&id("order2"));

    assert_eq!(book.depth(Side::Buy), depth_before);
    assert_eq!(book.order_count(), 1);
    assert!(!book.contains(&id("order2")));
}
