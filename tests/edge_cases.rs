// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! Edge-case tests: adversarial inputs to every public book API.

use lobsim::{OrderBook, OrderId, Price, Side, Trader, Traders};

// ============================================================================
// Empty book operations
// ============================================================================

#[test]
fn cancel_nonexistent_order() {
    let mut book = OrderBook::new();
    assert_eq!(book.cancel_order(OrderId(999)), None);
}

#[test]
fn market_order_empty_book() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    let filled = book.process_market_order(Side::Buy, 100, None, &mut traders);
    assert_eq!(filled, 0);
    assert!(book.trades().is_empty());
}

#[test]
fn quotes_on_empty_book() {
    let mut book = OrderBook::new();
    assert_eq!(book.best_bid_ask(), (None, None, None));
    assert_eq!(book.last_trade_price(), None);
}

#[test]
fn clean_empty_book() {
    let mut book = OrderBook::new();
    book.clean_order_books();
    assert_eq!(book.queue_depths(), (0, 0));
}

// ============================================================================
// Zero-quantity edge cases
// ============================================================================

#[test]
fn limit_order_zero_qty() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    assert_eq!(
        book.add_limit_order(Side::Buy, Price(100_00), 0, None, &mut traders),
        None
    );
    assert_eq!(book.live_order_count(), 0);
}

#[test]
fn market_order_zero_qty() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    book.add_limit_order(Side::Sell, Price(100_00), 100, None, &mut traders);

    let filled = book.process_market_order(Side::Buy, 0, None, &mut traders);

    assert_eq!(filled, 0);
    assert!(book.trades().is_empty());
    assert_eq!(book.live_order_count(), 1);
}

// ============================================================================
// Double cancel and cancel-after-fill
// ============================================================================

#[test]
fn double_cancel_is_noop() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    let id = book
        .add_limit_order(Side::Buy, Price(99_00), 10, None, &mut traders)
        .unwrap();

    assert_eq!(book.cancel_order(id), Some(id));
    assert_eq!(book.cancel_order(id), None);
}

#[test]
fn cancel_after_full_fill_is_noop() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    let id = book
        .add_limit_order(Side::Sell, Price(100_00), 10, None, &mut traders)
        .unwrap();
    book.process_market_order(Side::Buy, 10, None, &mut traders);

    assert_eq!(book.cancel_order(id), None);
}

#[test]
fn cancelled_order_cannot_trade() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    let id = book
        .add_limit_order(Side::Sell, Price(100_00), 10, None, &mut traders)
        .unwrap();
    book.cancel_order(id);

    let filled = book.process_market_order(Side::Buy, 10, None, &mut traders);

    assert_eq!(filled, 0);
    assert!(book.trades().is_empty());
}

// ============================================================================
// Tombstone interactions
// ============================================================================

#[test]
fn tombstones_never_affect_quotes_or_matching() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();

    // Three asks; cancel the best two without cleaning.
    let a = book
        .add_limit_order(Side::Sell, Price(100_00), 10, None, &mut traders)
        .unwrap();
    let b = book
        .add_limit_order(Side::Sell, Price(100_10), 10, None, &mut traders)
        .unwrap();
    book.add_limit_order(Side::Sell, Price(100_20), 10, None, &mut traders);
    book.cancel_order(a);
    book.cancel_order(b);

    assert_eq!(book.best_bid_ask().1, Some(Price(100_20)));

    book.process_market_order(Side::Buy, 5, None, &mut traders);
    assert_eq!(book.trades()[0].price, Price(100_20));
}

#[test]
fn clean_after_heavy_cancellation() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();

    let ids: Vec<_> = (0..100)
        .map(|i| {
            book.add_limit_order(Side::Buy, Price(99_00 - i), 10, None, &mut traders)
                .unwrap()
        })
        .collect();
    for id in &ids[..99] {
        book.cancel_order(*id);
    }

    assert_eq!(book.queue_depths().0, 100);
    book.clean_order_books();
    assert_eq!(book.queue_depths().0, 1);
    assert_eq!(book.live_order_count(), 1);
    // The survivor still quotes.
    assert_eq!(book.best_bid_ask().0, Some(Price(99_00 - 99)));
}

// ============================================================================
// Crossing edge cases
// ============================================================================

#[test]
fn exact_price_match_trades() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    book.add_limit_order(Side::Sell, Price(100_00), 10, None, &mut traders);
    book.add_limit_order(Side::Buy, Price(100_00), 10, None, &mut traders);

    assert_eq!(book.trades().len(), 1);
    assert_eq!(book.live_order_count(), 0);
}

#[test]
fn one_cent_away_does_not_trade() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    book.add_limit_order(Side::Sell, Price(100_01), 10, None, &mut traders);
    book.add_limit_order(Side::Buy, Price(100_00), 10, None, &mut traders);

    assert!(book.trades().is_empty());
    assert_eq!(book.live_order_count(), 2);
}

#[test]
fn large_order_sweeps_entire_side() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    for i in 0..10 {
        book.add_limit_order(Side::Sell, Price(100_00 + i), 10, None, &mut traders);
    }

    let id = book
        .add_limit_order(Side::Buy, Price(200_00), 1_000, None, &mut traders)
        .unwrap();

    assert_eq!(book.trades().len(), 10);
    // 900 left over rests as the only live order.
    assert_eq!(book.live_order_count(), 1);
    assert_eq!(book.order(id).unwrap().quantity, 900);
    assert_eq!(book.best_bid_ask().1, None);
}

#[test]
fn aggressive_order_fills_at_multiple_prices() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    book.add_limit_order(Side::Sell, Price(100_00), 5, None, &mut traders);
    book.add_limit_order(Side::Sell, Price(100_01), 5, None, &mut traders);

    book.add_limit_order(Side::Buy, Price(100_01), 10, None, &mut traders);

    // Each fill priced at the resting order, best level first.
    assert_eq!(book.trades()[0].price, Price(100_00));
    assert_eq!(book.trades()[1].price, Price(100_01));
}

// ============================================================================
// Stale owner handles
// ============================================================================

#[test]
fn out_of_range_owner_handle_is_ignored() {
    use lobsim::TraderId;

    let mut book = OrderBook::new();
    let mut traders = Traders::new();

    // Owner id that resolves to no trader: fills settle no one, no panic.
    book.add_limit_order(Side::Sell, Price(100_00), 10, Some(TraderId(42)), &mut traders);
    let filled = book.process_market_order(Side::Buy, 10, Some(TraderId(43)), &mut traders);

    assert_eq!(filled, 10);
    assert_eq!(book.trades().len(), 1);
}

#[test]
fn owned_and_ownerless_orders_mix() {
    let mut book = OrderBook::new();
    let mut traders = Traders::new();
    let id = traders.add(Trader::new("t", 0, 1_000));

    book.add_limit_order(Side::Sell, Price(100_00), 5, None, &mut traders);
    book.add_limit_order(Side::Sell, Price(100_00), 5, Some(id), &mut traders);
    book.process_market_order(Side::Buy, 10, None, &mut traders);

    // Only the owned half settles.
    assert_eq!(traders.get(id).unwrap().inventory, -5);
    assert_eq!(traders.get(id).unwrap().pnl, 5 * 100_00);
}
