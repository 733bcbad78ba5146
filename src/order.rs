//! Order representation

use crate::{OrderId, Price, Quantity, Side, Timestamp, TraderId};

/// A live order in the book's authoritative index.
///
/// Identity (`id`, `side`, `price`, `timestamp`, `owner`) is fixed at
/// creation; only `quantity` changes as fills are applied. The moment
/// `quantity` reaches zero the order is removed from the index and never
/// mutated again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    /// Unique identifier assigned by the book
    pub id: OrderId,
    /// Buy or sell
    pub side: Side,
    /// Limit price (max for buy, min for sell)
    pub price: Price,
    /// Quantity still available to fill. Strictly positive while indexed.
    pub quantity: Quantity,
    /// Arrival sequence number; the time-priority tie-break key
    pub timestamp: Timestamp,
    /// Owning trader, if any. Weak handle; the book never owns trader lifetime.
    pub owner: Option<TraderId>,
}

impl Order {
    /// Create a new order with the given parameters.
    pub fn new(
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: Timestamp,
        owner: Option<TraderId>,
    ) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
            timestamp,
            owner,
        }
    }

    /// Reduce the order's quantity by a fill.
    ///
    /// # Panics
    ///
    /// Panics if `quantity` exceeds the remaining quantity.
    pub fn fill(&mut self, quantity: Quantity) {
        assert!(
            quantity <= self.quantity,
            "fill quantity {} exceeds remaining {}",
            quantity,
            self.quantity
        );
        self.quantity -= quantity;
    }

    /// Returns true if the order has been fully consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.quantity == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_order(quantity: Quantity) -> Order {
        Order::new(OrderId(1), Side::Buy, Price(100_00), quantity, 1, None)
    }

    #[test]
    fn new_order_state() {
        let order = make_order(10);
        assert_eq!(order.quantity, 10);
        assert_eq!(order.owner, None);
        assert!(!order.is_exhausted());
    }

    #[test]
    fn partial_then_full_fill() {
        let mut order = make_order(10);

        order.fill(3);
        assert_eq!(order.quantity, 7);
        assert!(!order.is_exhausted());

        order.fill(7);
        assert_eq!(order.quantity, 0);
        assert!(order.is_exhausted());
    }

    #[test]
    #[should_panic(expected = "fill quantity 11 exceeds remaining 10")]
    fn fill_exceeds_remaining_panics() {
        let mut order = make_order(10);
        order.fill(11);
    }
}
