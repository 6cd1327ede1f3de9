use crate::orderbook::Book;
use crate::types::{OrderId, Price, Qty, Side};

fn id(s: &str) -> OrderId {
    OrderId::from(s)
}

/// Order ids queued at `(side, price)`, oldest first.
fn queue_at(book: &Book, side: Side, price: Price) -> Vec<String> {
    let Some(key) = book.ladder(side).get(price) else {
        return Vec::new();
    };
    book.levels[key]
        .iter(&book.orders)
        .map(|order| book.orders[order].id.to_string())
        .collect()
}

#[test]
fn test_identical_modify_keeps_queue_position() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));
    book.add(Side::Buy, id("order2"), Qty::new(10), Price::new(1000));

    assert!(book.modify(Side::Buy, &id("order1"), Qty::new(10), Price::new(1000)));

    assert_eq!(queue_at(&book, Side::Buy, Price::new(1000)), ["order1", "order2"]);
}

#[test]
fn test_qty_modify_sends_order_to_tail() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));
    book.add(Side::Buy, id("order2"), Qty::new(10), Price::new(1000));

    assert!(book.modify(Side::Buy, &id("order1"), Qty::new(20), Price::new(1000)));

    assert_eq!(queue_at(&book, Side::Buy, Price::new(1000)), ["order2", "order1"]);
    assert_eq!(book.order(&id("order1")).unwrap().qty, Qty::new(20));
    assert_eq!(
        book.depth(Side::Buy),
        vec![(Price::new(1000), Qty::new(30))]
    );
}

#[test]
fn test_qty_reduction_also_sends_order_to_tail() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));
    book.add(Side::Buy, id("order2"), Qty::new(10), Price::new(1000));

    book.modify(Side::Buy, &id("order1"), Qty::new(4), Price::new(1000));

    assert_eq!(queue_at(&book, Side::Buy, Price::new(1000)), ["order2", "order1"]);
    assert_eq!(
        book.depth(Side::Buy),
        vec![(Price::new(1000), Qty::new(14))]
    );
}

#[test]
fn test_price_modify_relocates_to_destination_tail() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));
    book.add(Side::Buy, id("order2"), Qty::new(5), Price::new(1005));

    book.modify(Side::Buy, &id("order1"), Qty::new(10), Price::new(1005));

    // Source level destroyed, order appended behind the incumbent.
    assert_eq!(book.level_count(Side::Buy), 1);
    assert_eq!(queue_at(&book, Side::Buy, Price::new(1005)), ["order2", "order1"]);
    assert_eq!(
        book.depth(Side::Buy),
        vec![(Price::new(1005), Qty::new(15))]
    );
}

#[test]
fn test_side_modify_relocates_across_ladders() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));

    book.modify(Side::Sell, &id("order1"), Qty::new(10), Price::new(1200));

    assert!(book.ladder(Side::Buy).is_empty());
    let resting = book.order(&id("order1")).unwrap();
    assert_eq!(resting.side, Side::Sell);
    assert_eq!(resting.price, Price::new(1200));
    assert_eq!(book.best_ask(), Some(Price::new(1200)));
}

#[test]
fn test_relocation_keeps_source_level_with_other_orders() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));
    book.add(Side::Buy, id("order2"), Qty::new(20), Price::new(1000));

    book.modify(Side::Buy, &id("order1"), Qty::new(10), Price::new(990));

    assert_eq!(queue_at(&book, Side::Buy, Price::new(1000)), ["order2"]);
    assert_eq!(
        book.depth(Side::Buy),
        vec![
            (Price::new(1000), Qty::new(20)),
            (Price::new(990), Qty::new(10)),
        ]
    );
}

#[test]
fn test_modify_keeps_id_index_entry() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));

    book.modify(Side::Sell, &id("order1"), Qty::new(7), Price::new(1100));

    assert!(book.contains(&id("order1")));
    assert_eq!(book.order_count(), 1);
}

#[test]
fn test_modify_unknown_is_noop() {
    let mut book = Book::new();
    book.add(Side::Buy, id("order1"), Qty::new(10), Price::new(1000));

    assert!(!book.modify(Side::Buy, &id("ghost"), Qty::new(5), Price::new(1000)));
    assert_eq!(book.order_count(), 1);
    assert_eq!(book.order(&id("order1")).unwrap().qty, Qty::new(10));
}
