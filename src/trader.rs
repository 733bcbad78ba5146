//! Trader accounting shared by every policy variant.

use crate::{Price, Quantity, Side, TraderId};

/// Inventory and realized-PnL accounting for one trading entity.
///
/// Created once at simulation start and mutated only through fill
/// notifications; policies read it, the matching engine writes it.
#[derive(Clone, Debug)]
pub struct Trader {
    /// Human-readable identity for reporting
    pub name: String,
    /// Signed position, long positive. Starts at the configured seed value.
    pub inventory: i64,
    /// Realized PnL in cents. Starts at zero.
    pub pnl: i64,
    /// Inventory bound this trader's policy must stay within.
    /// Market-making roles get a wider bound (4× the standard one).
    pub max_inventory: i64,
}

impl Trader {
    pub fn new(name: impl Into<String>, starting_inventory: i64, max_inventory: i64) -> Self {
        Self {
            name: name.into(),
            inventory: starting_inventory,
            pnl: 0,
            max_inventory,
        }
    }

    /// Apply one side of a fill.
    ///
    /// Buying spends cash and adds inventory; selling is the reverse. Each
    /// fill reaches a trader exactly once per side, synchronously with the
    /// book mutation that produced it.
    pub fn apply_fill(&mut self, side: Side, price: Price, quantity: Quantity) {
        let notional = price.0 * quantity as i64;
        match side {
            Side::Buy => {
                self.pnl -= notional;
                self.inventory += quantity as i64;
            }
            Side::Sell => {
                self.pnl += notional;
                self.inventory -= quantity as i64;
            }
        }
    }

    /// Realized PnL plus inventory valued at the reference price, in cents.
    /// Falls back to raw PnL when no reference price is available.
    pub fn mark_to_market(&self, reference: Option<Price>) -> i64 {
        match reference {
            Some(price) => self.pnl + self.inventory * price.0,
            None => self.pnl,
        }
    }
}

/// Registry of all traders in a run.
///
/// Orders refer to traders by [`TraderId`] index; the registry owns the
/// traders, the book does not. A stale handle simply resolves to `None`.
#[derive(Clone, Debug, Default)]
pub struct Traders {
    traders: Vec<Trader>,
}

impl Traders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trader, returning its stable handle.
    pub fn add(&mut self, trader: Trader) -> TraderId {
        let id = TraderId(self.traders.len());
        self.traders.push(trader);
        id
    }

    pub fn get(&self, id: TraderId) -> Option<&Trader> {
        self.traders.get(id.0)
    }

    pub fn get_mut(&mut self, id: TraderId) -> Option<&mut Trader> {
        self.traders.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraderId, &Trader)> {
        self.traders
            .iter()
            .enumerate()
            .map(|(i, t)| (TraderId(i), t))
    }

    pub fn len(&self) -> usize {
        self.traders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traders.is_empty()
    }
}
