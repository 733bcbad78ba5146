//! Trade records

use crate::{Price, Quantity, Side, Timestamp};
use std::fmt;

/// An executed fill.
///
/// The trade log is append-only: records are never mutated or removed.
/// The price is always the resting (quoted) order's price, so the aggressor
/// gets price improvement when its limit was more generous.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trade {
    /// Execution price (the resting order's quote)
    pub price: Price,
    /// Quantity executed
    pub quantity: Quantity,
    /// Arrival sequence number of the aggressing order
    pub timestamp: Timestamp,
    /// Side of the aggressor
    pub aggressor_side: Side,
}

impl Trade {
    pub fn new(price: Price, quantity: Quantity, timestamp: Timestamp, aggressor_side: Side) -> Self {
        Self {
            price,
            quantity,
            timestamp,
            aggressor_side,
        }
    }

    /// Notional value in cent-shares (price cents × quantity).
    #[inline]
    pub fn notional(&self) -> i64 {
        self.price.0 * self.quantity as i64
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {}",
            self.aggressor_side, self.quantity, self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notional_value() {
        let trade = Trade::new(Price(100_50), 10, 7, Side::Buy);
        assert_eq!(trade.notional(), 100_500);
    }

    #[test]
    fn display() {
        let trade = Trade::new(Price(99_99), 5, 1, Side::Sell);
        assert_eq!(format!("{}", trade), "sell 5 @ $99.99");
    }
}
