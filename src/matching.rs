//! Matching engine: price-time priority with lazy-deletion tombstones.
//!
//! One loop serves both entry points: the internal cross of an incoming
//! limit order (price-gated) and a market-order sweep (no gate). The loop
//! pops the best opposite-side entry, discards tombstones, trades at the
//! *resting* price, and pushes partially filled orders back under their
//! original key so they keep their time priority.
//!
//! Fill notifications to both owners happen inline, atomically with the
//! book mutation that produced them: no caller can observe a state where
//! the book has changed but a counterparty's accounting has not.

use crate::{OrderBook, Price, Quantity, Side, Timestamp, Trade, TraderId, Traders};

impl OrderBook {
    /// Does an incoming order at `incoming_price` cross a resting quote?
    ///
    /// - buy crosses if buy price >= resting ask price
    /// - sell crosses if sell price <= resting bid price
    #[inline]
    fn prices_cross(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
        match incoming_side {
            Side::Buy => incoming_price >= resting_price,
            Side::Sell => incoming_price <= resting_price,
        }
    }

    /// Trade `quantity` against the opposite side, returning the unfilled
    /// remainder.
    ///
    /// With `limit = Some(price)` matching stops at the first resting order
    /// that is not marketable (queue priority guarantees nothing better
    /// hides behind it); with `limit = None` it runs until the incoming
    /// quantity is exhausted or the opposite queue is empty. An empty
    /// opposite side is not an error: the remainder is simply returned.
    pub(crate) fn consume_liquidity(
        &mut self,
        side: Side,
        limit: Option<Price>,
        quantity: Quantity,
        owner: Option<TraderId>,
        timestamp: Timestamp,
        traders: &mut Traders,
    ) -> Quantity {
        let mut remaining = quantity;
        let opposite = side.opposite();

        while remaining > 0 {
            let entry = match self.queue_mut(opposite).pop() {
                Some(entry) => entry,
                None => break, // no liquidity
            };

            // Tombstone: the order left the index via cancel or full fill.
            let Some(resting) = self.orders().get(&entry.id) else {
                continue;
            };
            let resting_quantity = resting.quantity;
            let resting_owner = resting.owner;

            if let Some(limit_price) = limit {
                if !Self::prices_cross(side, limit_price, entry.price) {
                    // First non-marketable order; put it back and stop.
                    self.queue_mut(opposite).push_back(entry);
                    break;
                }
            }

            let fill = remaining.min(resting_quantity);
            remaining -= fill;

            if fill == resting_quantity {
                // Fully consumed: out of the index, entry not re-pushed.
                self.orders_mut().remove(&entry.id);
            } else {
                let order = self
                    .orders_mut()
                    .get_mut(&entry.id)
                    .expect("resting order checked live above");
                order.fill(fill);
                // Original key: the partial fill keeps its time priority.
                self.queue_mut(opposite).push_back(entry);
            }

            self.record_trade(Trade::new(entry.price, fill, timestamp, side));

            // Both counterparties settle in the same breath as the book.
            if let Some(id) = owner {
                if let Some(trader) = traders.get_mut(id) {
                    trader.apply_fill(side, entry.price, fill);
                }
            }
            if let Some(id) = resting_owner {
                if let Some(trader) = traders.get_mut(id) {
                    trader.apply_fill(opposite, entry.price, fill);
                }
            }
        }

        remaining
    }
}
