//! Tabular Q-learning for the adaptive market maker.
//!
//! The environment is condensed into a small discrete state (inventory
//! bucket, price bucket) and five quoting actions. Values live in a lazily
//! grown table: a state gets its action-value row, all zeros, on first
//! visit, and the table never shrinks.

use rand::Rng;
use rustc_hash::FxHashMap;

use crate::Price;

/// Width of one inventory bucket, in shares.
const INVENTORY_BUCKET: i64 = 10;
/// Width of one price bucket, in cents.
const PRICE_BUCKET: i64 = 10;

/// Quote adjustment chosen each active tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuoteAction {
    /// Widen the half-spread by one cent
    Widen,
    /// Narrow the half-spread by one cent (floored at half a cent)
    Narrow,
    /// Shift both quotes up one cent
    ShiftUp,
    /// Shift both quotes down one cent
    ShiftDown,
    /// Quote unchanged
    Hold,
}

impl QuoteAction {
    /// All actions, in the fixed order used for greedy tie-breaks.
    pub const ALL: [QuoteAction; 5] = [
        QuoteAction::Widen,
        QuoteAction::Narrow,
        QuoteAction::ShiftUp,
        QuoteAction::ShiftDown,
        QuoteAction::Hold,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            QuoteAction::Widen => 0,
            QuoteAction::Narrow => 1,
            QuoteAction::ShiftUp => 2,
            QuoteAction::ShiftDown => 3,
            QuoteAction::Hold => 4,
        }
    }
}

/// Discretized market state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QState {
    /// Inventory / 10, truncated toward zero
    pub inventory_bucket: i64,
    /// Mid price in cents / 10, truncated
    pub price_bucket: i64,
}

impl QState {
    pub fn encode(inventory: i64, mid: Price) -> Self {
        Self {
            inventory_bucket: inventory / INVENTORY_BUCKET,
            price_bucket: mid.0 / PRICE_BUCKET,
        }
    }
}

/// State-action value table with epsilon-greedy selection and a single-step
/// temporal-difference update.
#[derive(Clone, Debug)]
pub struct QTable {
    values: FxHashMap<QState, [f64; 5]>,
    /// Learning rate
    alpha: f64,
    /// Discount on future value
    gamma: f64,
    /// Exploration probability
    epsilon: f64,
}

impl QTable {
    pub fn new(alpha: f64, gamma: f64, epsilon: f64) -> Self {
        Self {
            values: FxHashMap::default(),
            alpha,
            gamma,
            epsilon,
        }
    }

    /// Epsilon-greedy selection.
    ///
    /// With probability epsilon, a uniform random action; otherwise the
    /// highest-valued action for `state`, ties broken by the fixed order of
    /// [`QuoteAction::ALL`] (so `epsilon = 0` is fully deterministic).
    pub fn choose_action(&mut self, state: QState, rng: &mut impl Rng) -> QuoteAction {
        if self.epsilon > 0.0 && rng.gen_range(0.0..1.0) < self.epsilon {
            return QuoteAction::ALL[rng.gen_range(0..QuoteAction::ALL.len())];
        }

        let row = self.values.entry(state).or_insert([0.0; 5]);
        let mut best = QuoteAction::ALL[0];
        for &action in &QuoteAction::ALL[1..] {
            if row[action.index()] > row[best.index()] {
                best = action;
            }
        }
        best
    }

    /// Single-step Bellman update for the previous tick's decision:
    ///
    /// `Q[s][a] += alpha * (reward + gamma * max(Q[s']) - Q[s][a])`
    pub fn update(&mut self, state: QState, action: QuoteAction, reward: f64, next_state: QState) {
        let best_future = self
            .values
            .entry(next_state)
            .or_insert([0.0; 5])
            .iter()
            .fold(f64::NEG_INFINITY, |a, &b| a.max(b));

        let row = self.values.entry(state).or_insert([0.0; 5]);
        let old = row[action.index()];
        row[action.index()] = old + self.alpha * (reward + self.gamma * best_future - old);
    }

    /// Learned value of a state-action pair (0.0 for unseen states).
    pub fn value(&self, state: QState, action: QuoteAction) -> f64 {
        self.values
            .get(&state)
            .map(|row| row[action.index()])
            .unwrap_or(0.0)
    }

    /// Overwrite one state-action value. Used to warm-start a policy.
    pub fn set_value(&mut self, state: QState, action: QuoteAction, value: f64) {
        self.values.entry(state).or_insert([0.0; 5])[action.index()] = value;
    }

    /// Number of states visited so far.
    pub fn state_count(&self) -> usize {
        self.values.len()
    }
}
