//! Heuristic market maker: symmetric quotes with linear inventory skew.
//!
//! On a fixed cadence the maker cancels its previous pair of quotes and
//! posts a fresh bid and ask around the current mid. Quotes shift down as
//! inventory builds up long (to sell it off) and up as it builds short,
//! and a side is withheld entirely when one more fill there could breach
//! the inventory bound.

use rustc_hash::FxHashSet;

use crate::config::MakerConfig;
use crate::policy::Policy;
use crate::{OrderBook, OrderId, Price, Quantity, Side, Tick, TraderId, Traders};

/// Fixed-spread quoting policy.
pub struct HeuristicMarketMaker {
    trader_id: TraderId,
    name: String,
    config: MakerConfig,
    /// Quoted size per side, a tenth of the inventory bound
    order_size: Quantity,
    /// Ids of our quotes from the previous round, cancelled on requote
    active_orders: FxHashSet<OrderId>,
    next_quote: Tick,
}

impl HeuristicMarketMaker {
    pub fn new(trader_id: TraderId, config: MakerConfig, max_inventory: i64) -> Self {
        let order_size = (max_inventory / 10).max(1) as Quantity;
        Self {
            trader_id,
            name: String::from("maker"),
            config,
            order_size,
            active_orders: FxHashSet::default(),
            next_quote: 0,
        }
    }

    /// Downward shift of both quotes, in dollars. Long inventory pushes
    /// quotes down, short inventory pushes them up; at the bound the shift
    /// reaches a full spread.
    fn inventory_skew(inventory: i64, bound: i64, half_spread: f64) -> f64 {
        2.0 * (inventory as f64 / bound as f64) * half_spread
    }
}

impl Policy for HeuristicMarketMaker {
    fn trader_id(&self) -> TraderId {
        self.trader_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, book: &mut OrderBook, traders: &mut Traders, tick: Tick) {
        if tick < self.next_quote {
            return;
        }
        let (_, _, mid) = book.best_bid_ask();
        let Some(mid) = mid else {
            return;
        };

        for id in self.active_orders.drain() {
            book.cancel_order(id);
        }

        let Some(trader) = traders.get(self.trader_id) else {
            return;
        };
        let (inventory, bound) = (trader.inventory, trader.max_inventory);

        let half_spread = self.config.half_spread;
        let skew = Self::inventory_skew(inventory, bound, half_spread);
        let bid = Price::from_dollars(mid.to_dollars() - half_spread - skew);
        let ask = Price::from_dollars(mid.to_dollars() + half_spread - skew);
        let size = self.order_size;

        // Withhold a side when a full fill there could breach the bound.
        if inventory < bound - size as i64 {
            if let Some(id) = book.add_limit_order(Side::Buy, bid, size, Some(self.trader_id), traders)
            {
                self.active_orders.insert(id);
            }
        }
        if inventory > -bound + size as i64 {
            if let Some(id) =
                book.add_limit_order(Side::Sell, ask, size, Some(self.trader_id), traders)
            {
                self.active_orders.insert(id);
            }
        }

        self.next_quote = tick + self.config.quote_freq;
    }
}
