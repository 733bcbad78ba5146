//! The common contract all trading policies implement.

use crate::{OrderBook, Tick, TraderId, Traders};

/// One autonomous trading behavior driving the book.
///
/// The driver calls [`step`] once per tick in a fixed population order.
/// Policies self-schedule: most calls are no-ops, and an active tick
/// mutates the book at most a handful of times. A missing mid price is
/// never an error; policies return early until the book quotes.
///
/// [`step`]: Policy::step
pub trait Policy {
    /// Handle of the trader whose accounting this policy drives.
    fn trader_id(&self) -> TraderId;

    /// Human-readable policy name for logging and reports.
    fn name(&self) -> &str;

    /// Act on the book for this tick (usually a no-op).
    fn step(&mut self, book: &mut OrderBook, traders: &mut Traders, tick: Tick);
}
