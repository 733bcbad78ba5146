//! Simulation configuration: population composition and per-policy knobs.
//!
//! Everything is `Default`-able for programmatic use and deserializable
//! from TOML for the CLI. Validation happens once, up front, so policies
//! can treat their parameters as trusted.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Noise trader parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Smallest order size
    pub min_quantity: u64,
    /// Largest typical order size (the large-order tail goes up to 2x this)
    pub max_quantity: u64,
    /// Std-dev of the Gaussian price perturbation, in dollars
    pub price_noise_std: f64,
    /// Per-trader upward bias probability is drawn uniformly from this range
    pub bias_low: f64,
    pub bias_high: f64,
    /// Reference price used before the book has a mid, in dollars
    pub fallback_price: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            min_quantity: 1,
            max_quantity: 10,
            price_noise_std: 0.01,
            bias_low: 0.48,
            bias_high: 0.53,
            fallback_price: 100.0,
        }
    }
}

/// Momentum (informed) trader parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InformedConfig {
    /// Mid-price move (dollars) that triggers a trade
    pub threshold: f64,
    pub min_quantity: u64,
    pub max_quantity: u64,
}

impl Default for InformedConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            min_quantity: 1,
            max_quantity: 10,
        }
    }
}

/// Heuristic market maker parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MakerConfig {
    /// Half-spread in dollars
    pub half_spread: f64,
    /// Quote refresh cadence in ticks
    pub quote_freq: u64,
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            half_spread: 0.015,
            quote_freq: 30,
        }
    }
}

/// Q-learning market maker parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RlConfig {
    /// Base half-spread in dollars, before the learned adjustment
    pub half_spread: f64,
    /// Quote refresh cadence in ticks
    pub quote_freq: u64,
    /// Learning rate (alpha)
    pub learning_rate: f64,
    /// Discount on future value (gamma)
    pub discount: f64,
    /// Exploration probability (epsilon)
    pub epsilon: f64,
}

impl Default for RlConfig {
    fn default() -> Self {
        Self {
            half_spread: 0.015,
            quote_freq: 30,
            learning_rate: 0.2,
            discount: 0.9,
            epsilon: 0.1,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of simulation ticks
    pub ticks: u64,
    /// Master RNG seed; fixes the whole run
    pub seed: u64,
    /// Population counts
    pub noise_traders: usize,
    pub informed_traders: usize,
    pub heuristic_makers: usize,
    pub rl_makers: usize,
    /// Levels per side in the initial resting-order ladder
    pub seed_depth: u64,
    /// Quantity at each seeded level
    pub seed_quantity: u64,
    /// Center of the seeded ladder, in dollars
    pub seed_mid: f64,
    /// Book compaction cadence in ticks
    pub clean_every: u64,
    /// Shares every trader starts with
    pub starting_inventory: i64,
    /// Standard inventory bound; market makers get 4x this
    pub max_inventory: i64,
    pub noise: NoiseConfig,
    pub informed: InformedConfig,
    pub maker: MakerConfig,
    pub rl: RlConfig,
}

/// Market-making roles run a wider book, so their bound is a multiple of
/// the standard one.
pub const MAKER_BOUND_MULTIPLIER: i64 = 4;

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 100_000,
            seed: 42,
            noise_traders: 20,
            informed_traders: 3,
            heuristic_makers: 1,
            rl_makers: 1,
            seed_depth: 10,
            seed_quantity: 10,
            seed_mid: 100.0,
            clean_every: 100,
            starting_inventory: 20,
            max_inventory: 50,
            noise: NoiseConfig::default(),
            informed: InformedConfig::default(),
            maker: MakerConfig::default(),
            rl: RlConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints the policies rely on.
    pub fn validate(&self) -> Result<()> {
        fn bad(msg: impl Into<String>) -> Result<()> {
            Err(Error::InvalidConfig(msg.into()))
        }

        if !(self.noise.price_noise_std.is_finite() && self.noise.price_noise_std > 0.0) {
            return bad("noise.price_noise_std must be positive and finite");
        }
        if !(0.0..=1.0).contains(&self.noise.bias_low)
            || !(0.0..=1.0).contains(&self.noise.bias_high)
            || self.noise.bias_low > self.noise.bias_high
        {
            return bad("noise.bias_low/bias_high must be an ordered range within [0, 1]");
        }
        if self.noise.min_quantity == 0 || self.noise.min_quantity > self.noise.max_quantity {
            return bad("noise.min_quantity must be in 1..=noise.max_quantity");
        }
        if self.noise.max_quantity / 2 < self.noise.min_quantity
            || self.noise.max_quantity * 2 < self.noise.min_quantity * 10
        {
            return bad("noise.max_quantity too small for the order-size mixture tiers");
        }
        if self.informed.min_quantity == 0 || self.informed.min_quantity > self.informed.max_quantity
        {
            return bad("informed.min_quantity must be in 1..=informed.max_quantity");
        }
        if self.maker.quote_freq == 0 || self.rl.quote_freq == 0 {
            return bad("quote_freq must be at least 1 tick");
        }
        if !(0.0..=1.0).contains(&self.rl.epsilon) {
            return bad("rl.epsilon must be within [0, 1]");
        }
        if !(self.rl.learning_rate > 0.0 && self.rl.learning_rate <= 1.0) {
            return bad("rl.learning_rate must be in (0, 1]");
        }
        if !(0.0..=1.0).contains(&self.rl.discount) {
            return bad("rl.discount must be within [0, 1]");
        }
        if self.max_inventory <= 0 {
            return bad("max_inventory must be positive");
        }
        if self.starting_inventory < 0 || self.starting_inventory > self.max_inventory {
            return bad("starting_inventory must be in 0..=max_inventory");
        }
        if self.clean_every == 0 {
            return bad("clean_every must be at least 1 tick");
        }
        Ok(())
    }
}
