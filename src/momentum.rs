//! Informed traders: momentum followers on a rolling mid-price window.
//!
//! An informed trader records the mid on every tick it is called, then on
//! its scheduled wake-ups compares the newest observation against the
//! oldest. A drop beyond the threshold reads as downward momentum and
//! triggers a market sell; a rise triggers a market buy. Contrarian to the
//! sign convention one might expect, but it is the behavior that makes the
//! trader *take* the move rather than fade it.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::InformedConfig;
use crate::policy::Policy;
use crate::{OrderBook, Side, Tick, TraderId, Traders};

/// Rolling mid-price observations kept.
const MID_WINDOW: usize = 100;
/// Ticks between trading decisions.
const WAKE_WAIT: std::ops::RangeInclusive<u64> = 50..=150;

/// Momentum trader on a rolling window of mid prices.
pub struct InformedTrader {
    trader_id: TraderId,
    name: String,
    config: InformedConfig,
    window: VecDeque<f64>,
    next_action: Tick,
    rng: StdRng,
}

impl InformedTrader {
    pub fn new(trader_id: TraderId, config: InformedConfig, mut rng: StdRng) -> Self {
        let next_action = rng.gen_range(WAKE_WAIT);
        Self {
            trader_id,
            name: String::from("informed"),
            config,
            window: VecDeque::with_capacity(MID_WINDOW),
            next_action,
            rng,
        }
    }

    /// Mid-price change across the window, in dollars.
    fn momentum(&self) -> Option<f64> {
        let (Some(&oldest), Some(&newest)) = (self.window.front(), self.window.back()) else {
            return None;
        };
        if self.window.len() < 2 {
            return None;
        }
        Some(newest - oldest)
    }
}

impl Policy for InformedTrader {
    fn trader_id(&self) -> TraderId {
        self.trader_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, book: &mut OrderBook, traders: &mut Traders, tick: Tick) {
        // Observe every tick, even while asleep: the signal window must not
        // have gaps just because the trader was not scheduled to act.
        let (_, _, mid) = book.best_bid_ask();
        if let Some(mid) = mid {
            if self.window.len() == MID_WINDOW {
                self.window.pop_front();
            }
            self.window.push_back(mid.to_dollars());
        }

        if tick < self.next_action {
            return;
        }
        let Some(delta) = self.momentum() else {
            return;
        };

        if delta > self.config.threshold {
            // Upward momentum read as exhausted: sell into it.
            let quantity = self
                .rng
                .gen_range(self.config.min_quantity..=self.config.max_quantity);
            if let Some(trader) = traders.get(self.trader_id) {
                if trader.inventory - quantity as i64 >= -trader.max_inventory {
                    book.process_market_order(Side::Sell, quantity, Some(self.trader_id), traders);
                }
            }
        }
        if delta < -self.config.threshold {
            let quantity = self
                .rng
                .gen_range(self.config.min_quantity..=self.config.max_quantity);
            if let Some(trader) = traders.get(self.trader_id) {
                if trader.inventory + quantity as i64 <= trader.max_inventory {
                    book.process_market_order(Side::Buy, quantity, Some(self.trader_id), traders);
                }
            }
        }

        self.next_action = tick + self.rng.gen_range(WAKE_WAIT);
    }
}
