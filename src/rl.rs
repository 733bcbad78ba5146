//! Q-learning market maker.
//!
//! Quoting works exactly like the heuristic maker (cancel, skew, withhold a
//! side near the bound), but each round the chosen [`QuoteAction`] first
//! adjusts the half-spread or the skew. After quoting, the change in
//! mark-to-market value since the previous round, less an inventory penalty,
//! becomes the reward for the *previous* round's decision and feeds one
//! Bellman update.

use rand::rngs::StdRng;
use rustc_hash::FxHashSet;

use crate::config::RlConfig;
use crate::policy::Policy;
use crate::qlearn::{QState, QTable, QuoteAction};
use crate::{OrderBook, OrderId, Price, Quantity, Side, Tick, TraderId, Traders};

/// One-cent adjustment applied by Widen/Narrow/Shift actions, in dollars.
const SPREAD_STEP: f64 = 0.01;
/// Narrowing never takes the half-spread below half a cent.
const MIN_HALF_SPREAD: f64 = 0.005;
/// Reward penalty per share of absolute inventory, in dollars.
const INVENTORY_PENALTY: f64 = 0.001;

/// Adaptive quoting policy learning a spread/skew adjustment per state.
pub struct RlMarketMaker {
    trader_id: TraderId,
    name: String,
    config: RlConfig,
    /// Quoted size per side, a twentieth of the inventory bound
    order_size: Quantity,
    active_orders: FxHashSet<OrderId>,
    qtable: QTable,
    /// State observed and action taken on the previous active round
    prev: Option<(QState, QuoteAction)>,
    /// Mark-to-market value after the previous round, in dollars
    prev_mtm: Option<f64>,
    next_quote: Tick,
    rng: StdRng,
}

impl RlMarketMaker {
    pub fn new(trader_id: TraderId, config: RlConfig, max_inventory: i64, rng: StdRng) -> Self {
        let order_size = (max_inventory / 20).max(1) as Quantity;
        let qtable = QTable::new(config.learning_rate, config.discount, config.epsilon);
        Self {
            trader_id,
            name: String::from("rl-maker"),
            config,
            order_size,
            active_orders: FxHashSet::default(),
            qtable,
            prev: None,
            prev_mtm: None,
            next_quote: 0,
            rng,
        }
    }

    /// Read access to the learned table, for reporting.
    pub fn qtable(&self) -> &QTable {
        &self.qtable
    }

    /// Mutable access, for warm-starting from a previous run.
    pub fn qtable_mut(&mut self) -> &mut QTable {
        &mut self.qtable
    }

    /// Base half-spread and skew for this round, after the learned action.
    fn quote_shape(&self, action: QuoteAction, inventory: i64, bound: i64) -> (f64, f64) {
        let base = self.config.half_spread;
        let mut half_spread = base;
        let mut skew = 2.0 * (inventory as f64 / bound as f64) * base;
        match action {
            QuoteAction::Widen => half_spread = base + SPREAD_STEP,
            QuoteAction::Narrow => half_spread = (base - SPREAD_STEP).max(MIN_HALF_SPREAD),
            QuoteAction::ShiftUp => skew -= SPREAD_STEP,
            QuoteAction::ShiftDown => skew += SPREAD_STEP,
            QuoteAction::Hold => {}
        }
        (half_spread, skew)
    }
}

impl Policy for RlMarketMaker {
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
        let Some(trader) = traders.get(self.trader_id) else {
            return;
        };
        let (inventory, bound) = (trader.inventory, trader.max_inventory);

        let state = QState::encode(inventory, mid);
        let action = self.qtable.choose_action(state, &mut self.rng);

        for id in self.active_orders.drain() {
            book.cancel_order(id);
        }

        let (half_spread, skew) = self.quote_shape(action, inventory, bound);
        let bid = Price::from_dollars(mid.to_dollars() - half_spread - skew);
        let ask = Price::from_dollars(mid.to_dollars() + half_spread - skew);
        let size = self.order_size;

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

        // Reward for the previous decision: change in portfolio value since
        // the last round, minus a holding penalty that nudges toward flat.
        if let Some(trader) = traders.get(self.trader_id) {
            let mtm = trader.mark_to_market(Some(mid)) as f64 / 100.0;
            if let (Some((prev_state, prev_action)), Some(prev_mtm)) = (self.prev, self.prev_mtm) {
                let reward = (mtm - prev_mtm) - INVENTORY_PENALTY * trader.inventory.abs() as f64;
                self.qtable.update(prev_state, prev_action, reward, state);
            }
            self.prev = Some((state, action));
            self.prev_mtm = Some(mtm);
        }

        self.next_quote = tick + self.config.quote_freq;
    }
}
