//! OrderBook: two tombstoned priority queues plus the authoritative index.
//!
//! The index (`orders`) is the single source of truth for which orders are
//! live and how much quantity remains. Queue entries are advisory pointers
//! that can go stale when an order is cancelled or filled; they are skipped
//! during matching and purged by [`OrderBook::clean_order_books`].

use rand::Rng;
use rustc_hash::FxHashMap;

use crate::queue::BookQueue;
use crate::{Order, OrderId, Price, Quantity, Side, Timestamp, Trade, TraderId, Traders};

/// The complete order book and trade log.
#[derive(Clone, Debug)]
pub struct OrderBook {
    /// Buy queue, best = highest price then earliest arrival
    bids: BookQueue,
    /// Sell queue, best = lowest price then earliest arrival
    asks: BookQueue,
    /// Authoritative index of live orders. An id present here has
    /// strictly positive quantity.
    orders: FxHashMap<OrderId, Order>,
    /// Append-only log of every fill
    trades: Vec<Trade>,
    /// Price of the most recent fill
    last_trade_price: Option<Price>,
    /// Next order id to assign
    next_order_id: u64,
    /// Next arrival sequence number to assign
    next_timestamp: u64,
}

impl OrderBook {
    /// Create a new empty order book.
    pub fn new() -> Self {
        Self {
            bids: BookQueue::new(Side::Buy),
            asks: BookQueue::new(Side::Sell),
            orders: FxHashMap::default(),
            trades: Vec::new(),
            last_trade_price: None,
            next_order_id: 1,
            next_timestamp: 1,
        }
    }

    pub(crate) fn next_order_id(&mut self) -> OrderId {
        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;
        id
    }

    pub(crate) fn next_timestamp(&mut self) -> Timestamp {
        let ts = self.next_timestamp;
        self.next_timestamp += 1;
        ts
    }

    // === Order access ===

    /// Get a live order by id. Filled and cancelled orders are absent.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// True if the order is still live.
    pub fn is_live(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
    }

    /// Number of live orders.
    pub fn live_order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn orders(&self) -> &FxHashMap<OrderId, Order> {
        &self.orders
    }

    pub(crate) fn orders_mut(&mut self) -> &mut FxHashMap<OrderId, Order> {
        &mut self.orders
    }

    pub(crate) fn queue_mut(&mut self, side: Side) -> &mut BookQueue {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    fn queue(&self, side: Side) -> &BookQueue {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    // === Trade log ===

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn last_trade_price(&self) -> Option<Price> {
        self.last_trade_price
    }

    pub(crate) fn record_trade(&mut self, trade: Trade) {
        self.last_trade_price = Some(trade.price);
        self.trades.push(trade);
    }

    // === Submission ===

    /// Submit a limit order.
    ///
    /// The order first crosses against the opposite side; any remainder
    /// rests on its own side's queue and in the index.
    ///
    /// Returns `Some(id)` for every non-empty submission, *including* orders
    /// fully consumed during the cross (such an id is simply not live, so a
    /// later cancel is a no-op). Returns `None` only for a zero-quantity
    /// submission, which never touches the book.
    pub fn add_limit_order(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        owner: Option<TraderId>,
        traders: &mut Traders,
    ) -> Option<OrderId> {
        if quantity == 0 {
            return None;
        }

        let id = self.next_order_id();
        let timestamp = self.next_timestamp();

        let remaining = self.consume_liquidity(side, Some(price), quantity, owner, timestamp, traders);

        if remaining > 0 {
            self.queue_mut(side).push(price, timestamp, id);
            self.orders
                .insert(id, Order::new(id, side, price, remaining, timestamp, owner));
        }

        Some(id)
    }

    /// Execute a market order against the opposite side.
    ///
    /// Consumes liquidity from the best price with no price gate. Never
    /// rests anything; if the book runs dry the unfilled remainder is
    /// silently dropped. Returns the quantity that did fill.
    pub fn process_market_order(
        &mut self,
        side: Side,
        quantity: Quantity,
        owner: Option<TraderId>,
        traders: &mut Traders,
    ) -> Quantity {
        if quantity == 0 {
            return 0;
        }
        let timestamp = self.next_timestamp();
        let remaining = self.consume_liquidity(side, None, quantity, owner, timestamp, traders);
        quantity - remaining
    }

    // === Cancellation (lazy) ===

    /// Cancel a live order.
    ///
    /// Removes the order from the authoritative index only; its queue entry
    /// stays behind as a tombstone until the next [`clean_order_books`] call.
    /// Unknown or already-gone ids are a no-op returning `None`.
    ///
    /// [`clean_order_books`]: OrderBook::clean_order_books
    pub fn cancel_order(&mut self, id: OrderId) -> Option<OrderId> {
        self.orders.remove(&id).map(|order| order.id)
    }

    /// Cancel a uniformly chosen live order. `None` if none are live.
    pub fn cancel_random_order(&mut self, rng: &mut impl Rng) -> Option<OrderId> {
        if self.orders.is_empty() {
            return None;
        }
        let nth = rng.gen_range(0..self.orders.len());
        let id = *self.orders.keys().nth(nth)?;
        self.cancel_order(id)
    }

    // === Compaction ===

    /// Rebuild both queues, discarding tombstones.
    ///
    /// O(n) in queue size; the driver calls this on a fixed cadence to bound
    /// memory growth (every cancellation and full fill leaves one tombstone
    /// behind otherwise). Idempotent: a second call with no intervening
    /// mutation changes nothing.
    pub fn clean_order_books(&mut self) {
        let live = &self.orders;
        self.bids.rebuild(|id| live.contains_key(&id));
        self.asks.rebuild(|id| live.contains_key(&id));
    }

    /// Queued entries per side, tombstones included. Compaction telemetry.
    pub fn queue_depths(&self) -> (usize, usize) {
        (self.bids.len(), self.asks.len())
    }

    // === Quotes ===

    /// Best live bid, best live ask, and mid price.
    ///
    /// Tombstones at the top of a queue are popped off before reading, so
    /// the returned quotes are always live. Mid is the midpoint when both
    /// sides quote, the single quoted side when only one does, absent when
    /// the book is empty.
    pub fn best_bid_ask(&mut self) -> (Option<Price>, Option<Price>, Option<Price>) {
        let bid = self.best_live_price(Side::Buy);
        let ask = self.best_live_price(Side::Sell);
        let mid = match (bid, ask) {
            (Some(b), Some(a)) => Some(Price((b.0 + a.0) / 2)),
            (Some(b), None) => Some(b),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        };
        (bid, ask, mid)
    }

    fn best_live_price(&mut self, side: Side) -> Option<Price> {
        loop {
            let top = *self.queue(side).peek()?;
            if self.orders.contains_key(&top.id) {
                return Some(top.price);
            }
            // Tombstone at the top; discard and keep looking.
            self.queue_mut(side).pop();
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
