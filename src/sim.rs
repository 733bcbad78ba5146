//! Single-threaded tick driver.
//!
//! Builds the trader population from a [`SimConfig`], seeds the book with a
//! resting-order ladder, then advances time one tick at a time. Every tick
//! each policy gets one `step` call in fixed population order; on a fixed
//! cadence the book queues are compacted. Determinism comes from the master
//! seed: it fixes the per-policy RNG seeds and each noise trader's bias, so
//! a given config reproduces a run exactly.

use log::{debug, info};
use rand::{Rng, RngCore, SeedableRng};
use rand::rngs::StdRng;

use crate::config::{MAKER_BOUND_MULTIPLIER, SimConfig};
use crate::maker::HeuristicMarketMaker;
use crate::momentum::InformedTrader;
use crate::noise::NoiseTrader;
use crate::policy::Policy;
use crate::rl::RlMarketMaker;
use crate::{OrderBook, Price, Side, Tick, Trader, Traders};

/// End-of-run accounting for one trader.
#[derive(Clone, Debug)]
pub struct TraderReport {
    pub name: String,
    pub inventory: i64,
    /// Realized PnL in cents
    pub pnl: i64,
    /// PnL with inventory valued at the final mid, in cents
    pub mark_to_market: i64,
}

/// A configured run: book, trader registry, and the policy population.
pub struct Simulation {
    config: SimConfig,
    book: OrderBook,
    traders: Traders,
    policies: Vec<Box<dyn Policy>>,
}

impl Simulation {
    /// Build the population and seed the book.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut traders = Traders::new();
        let mut policies: Vec<Box<dyn Policy>> = Vec::new();
        let maker_bound = config.max_inventory * MAKER_BOUND_MULTIPLIER;

        for i in 1..=config.noise_traders {
            let id = traders.add(Trader::new(
                format!("noise-{i}"),
                config.starting_inventory,
                config.max_inventory,
            ));
            let bias = rng.gen_range(config.noise.bias_low..=config.noise.bias_high);
            policies.push(Box::new(NoiseTrader::new(
                id,
                config.noise.clone(),
                bias,
                StdRng::seed_from_u64(rng.next_u64()),
            )));
        }
        for i in 1..=config.informed_traders {
            let id = traders.add(Trader::new(
                format!("informed-{i}"),
                config.starting_inventory,
                config.max_inventory,
            ));
            policies.push(Box::new(InformedTrader::new(
                id,
                config.informed.clone(),
                StdRng::seed_from_u64(rng.next_u64()),
            )));
        }
        for i in 1..=config.heuristic_makers {
            let id = traders.add(Trader::new(
                format!("maker-{i}"),
                config.starting_inventory,
                maker_bound,
            ));
            policies.push(Box::new(HeuristicMarketMaker::new(
                id,
                config.maker.clone(),
                maker_bound,
            )));
        }
        for i in 1..=config.rl_makers {
            let id = traders.add(Trader::new(
                format!("rl-maker-{i}"),
                config.starting_inventory,
                maker_bound,
            ));
            policies.push(Box::new(RlMarketMaker::new(
                id,
                config.rl.clone(),
                maker_bound,
                StdRng::seed_from_u64(rng.next_u64()),
            )));
        }

        let mut sim = Self {
            config,
            book: OrderBook::new(),
            traders,
            policies,
        };
        sim.seed_book();
        sim
    }

    /// Rest an ownerless ladder around the configured mid, one cent per
    /// level starting one cent off so the two sides never touch.
    fn seed_book(&mut self) {
        let center = Price::from_dollars(self.config.seed_mid);
        let quantity = self.config.seed_quantity;
        for level in 1..=self.config.seed_depth {
            let offset = level as i64;
            self.book.add_limit_order(
                Side::Buy,
                Price(center.0 - offset),
                quantity,
                None,
                &mut self.traders,
            );
            self.book.add_limit_order(
                Side::Sell,
                Price(center.0 + offset),
                quantity,
                None,
                &mut self.traders,
            );
        }
    }

    /// Advance one tick: every policy steps, then compaction on cadence.
    pub fn step(&mut self, tick: Tick) {
        for policy in &mut self.policies {
            policy.step(&mut self.book, &mut self.traders, tick);
        }
        if (tick + 1) % self.config.clean_every == 0 {
            let before = self.book.queue_depths();
            self.book.clean_order_books();
            let after = self.book.queue_depths();
            debug!(
                "tick {tick}: compacted queues {}+{} -> {}+{}",
                before.0, before.1, after.0, after.1
            );
        }
    }

    /// Run the configured number of ticks.
    pub fn run(&mut self) {
        info!(
            "starting run: {} ticks, {} traders, seed {}",
            self.config.ticks,
            self.traders.len(),
            self.config.seed
        );
        for tick in 0..self.config.ticks {
            self.step(tick);
        }
        let (bid, ask, _) = self.book.best_bid_ask();
        info!(
            "run complete: {} trades, final bid {:?} ask {:?}",
            self.book.trades().len(),
            bid,
            ask
        );
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut OrderBook {
        &mut self.book
    }

    pub fn traders(&self) -> &Traders {
        &self.traders
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Final accounting for every trader, marked at the closing mid.
    pub fn reports(&mut self) -> Vec<TraderReport> {
        let (_, _, mid) = self.book.best_bid_ask();
        self.traders
            .iter()
            .map(|(_, trader)| TraderReport {
                name: trader.name.clone(),
                inventory: trader.inventory,
                pnl: trader.pnl,
                mark_to_market: trader.mark_to_market(mid),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimConfig {
        SimConfig {
            ticks: 2_000,
            seed: 7,
            noise_traders: 5,
            informed_traders: 1,
            heuristic_makers: 1,
            rl_makers: 1,
            ..SimConfig::default()
        }
    }

    #[test]
    fn seeds_a_non_crossing_ladder() {
        let mut sim = Simulation::new(small_config());

        let (bid, ask, mid) = sim.book_mut().best_bid_ask();
        assert_eq!(bid, Some(Price(99_99)));
        assert_eq!(ask, Some(Price(100_01)));
        assert_eq!(mid, Some(Price(100_00)));
        // Depth 10 per side, nothing matched during seeding.
        assert_eq!(sim.book().live_order_count(), 20);
        assert!(sim.book().trades().is_empty());
    }

    #[test]
    fn population_matches_the_config() {
        let sim = Simulation::new(small_config());
        assert_eq!(sim.traders().len(), 8);
        assert_eq!(sim.policies.len(), 8);
    }

    #[test]
    fn run_produces_trades() {
        let mut sim = Simulation::new(small_config());
        sim.run();
        assert!(!sim.book().trades().is_empty());
    }

    #[test]
    fn same_seed_same_run() {
        let run = |seed| {
            let mut sim = Simulation::new(SimConfig {
                seed,
                ..small_config()
            });
            sim.run();
            let trades = sim.book().trades().len();
            let inventories: Vec<i64> = sim.traders().iter().map(|(_, t)| t.inventory).collect();
            (trades, inventories)
        };

        assert_eq!(run(7), run(7));
    }

    #[test]
    fn different_seeds_diverge() {
        let run = |seed| {
            let mut sim = Simulation::new(SimConfig {
                seed,
                ..small_config()
            });
            sim.run();
            (
                sim.book().trades().len(),
                sim.book_mut().best_bid_ask(),
            )
        };

        assert_ne!(run(1), run(2));
    }

    #[test]
    fn reports_cover_every_trader() {
        let mut sim = Simulation::new(small_config());
        sim.run();

        let reports = sim.reports();
        assert_eq!(reports.len(), 8);
        assert!(reports.iter().any(|r| r.name.starts_with("noise-")));
        assert!(reports.iter().any(|r| r.name == "rl-maker-1"));
    }

    #[test]
    fn compaction_keeps_queues_bounded() {
        let mut sim = Simulation::new(small_config());
        sim.run();

        // Right after a full run the queues hold at most one compaction
        // window's worth of stale entries beyond the live orders.
        let live = sim.book().live_order_count();
        let (bids, asks) = sim.book().queue_depths();
        assert!(bids + asks <= live + 400, "tombstones piling up");
    }
}
