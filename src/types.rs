//! Core types: Price, Quantity, Timestamp, Tick, OrderId, TraderId

use std::fmt;

/// Price in cents.
///
/// `Price(10050)` represents $100.50. Fixed-point storage gives exact
/// 2-decimal resolution; rounding happens only at order-creation boundaries
/// (see [`Price::from_dollars`]), never inside matching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Convert a price in dollars to cents, rounding to the nearest cent.
    ///
    /// Policies quote in continuous dollars (mid ± spread ± skew); this is
    /// the rounding boundary where those quotes become book prices.
    pub fn from_dollars(dollars: f64) -> Self {
        Price((dollars * 100.0).round() as i64)
    }

    /// The price in dollars as a float (for policy arithmetic only).
    pub fn to_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0 / 100;
        let cents = (self.0 % 100).abs();
        if self.0 < 0 {
            write!(f, "-${}.{:02}", dollars.abs(), cents)
        } else {
            write!(f, "${}.{:02}", dollars, cents)
        }
    }
}

/// Quantity of shares. Strictly positive for any order resting on the book.
pub type Quantity = u64;

/// Order-arrival sequence number assigned by the book.
/// Monotonically increasing; used only for time-priority tie-breaks.
pub type Timestamp = u64;

/// Simulation clock tick, advanced by the driver.
pub type Tick = u64;

/// Unique order identifier assigned by the book. Never reused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{}", self.0)
    }
}

/// Handle into the trader registry.
///
/// This is a non-owning reference: the book stores it on orders but never
/// controls trader lifetime, and a dangling handle is treated as "no owner".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TraderId(pub usize);

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_ordering() {
        assert!(Price(100) < Price(200));
        assert!(Price(-50) < Price(50));
        assert_eq!(Price(100), Price(100));
    }

    #[test]
    fn price_display() {
        assert_eq!(format!("{}", Price(10050)), "$100.50");
        assert_eq!(format!("{}", Price(5)), "$0.05");
        assert_eq!(format!("{}", Price(-250)), "-$2.50");
    }

    #[test]
    fn dollars_round_trip() {
        assert_eq!(Price::from_dollars(100.0), Price(100_00));
        assert_eq!(Price::from_dollars(99.982), Price(99_98));
        assert_eq!(Price::from_dollars(100.016), Price(100_02));
        assert!((Price(100_50).to_dollars() - 100.5).abs() < 1e-12);
    }

    #[test]
    fn id_display() {
        assert_eq!(format!("{}", OrderId(42)), "O42");
        assert_eq!(format!("{}", TraderId(3)), "A3");
    }
}
