// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # lobsim
//!
//! An agent-based limit order book simulator: a price-time priority
//! matching engine driven by a population of heterogeneous trading
//! policies.
//!
//! ## Features
//!
//! - **Matching engine**: price-time priority, partial fills, trades at
//!   the resting order's price
//! - **Lazy deletion**: cancels leave tombstones in the priority queues;
//!   a periodic compaction pass purges them
//! - **Policies**: biased noise traders, momentum followers, a
//!   spread-quoting market maker, and a tabular Q-learning market maker
//! - **Deterministic runs**: one master seed fixes the whole simulation
//! - **Fixed-point prices**: integer cents, no floating-point drift
//!
//! ## Quick Start
//!
//! ```
//! use lobsim::{OrderBook, Price, Side, Traders};
//!
//! let mut book = OrderBook::new();
//! let mut traders = Traders::new();
//!
//! // Rest an ask, then cross it with an aggressive bid.
//! book.add_limit_order(Side::Sell, Price(100_01), 10, None, &mut traders);
//! book.add_limit_order(Side::Buy, Price(100_01), 4, None, &mut traders);
//!
//! assert_eq!(book.trades().len(), 1);
//! assert_eq!(book.trades()[0].price, Price(100_01));
//! assert_eq!(book.trades()[0].quantity, 4);
//! ```
//!
//! ## Running a simulation
//!
//! ```
//! use lobsim::{SimConfig, Simulation};
//!
//! let config = SimConfig {
//!     ticks: 1_000,
//!     noise_traders: 5,
//!     ..SimConfig::default()
//! };
//! let mut sim = Simulation::new(config);
//! sim.run();
//!
//! for report in sim.reports() {
//!     println!("{}: inv {} mtm {}", report.name, report.inventory, report.mark_to_market);
//! }
//! ```
//!
//! ## Price Representation
//!
//! Prices are [`i64`] cents:
//!
//! ```
//! use lobsim::Price;
//!
//! let price = Price(100_50); // $100.50
//! assert_eq!(format!("{}", price), "$100.50");
//! assert_eq!(Price::from_dollars(100.499), price);
//! ```

pub mod book;
pub mod config;
pub mod error;
pub mod maker;
pub mod matching;
pub mod momentum;
pub mod noise;
pub mod order;
pub mod policy;
pub mod qlearn;
pub mod queue;
pub mod rl;
pub mod side;
pub mod sim;
pub mod trade;
pub mod trader;
pub mod types;

pub use book::OrderBook;
pub use config::{InformedConfig, MakerConfig, NoiseConfig, RlConfig, SimConfig};
pub use error::{Error, Result};
pub use maker::HeuristicMarketMaker;
pub use momentum::InformedTrader;
pub use noise::NoiseTrader;
pub use order::Order;
pub use policy::Policy;
pub use qlearn::{QState, QTable, QuoteAction};
pub use rl::RlMarketMaker;
pub use side::Side;
pub use sim::{Simulation, TraderReport};
pub use trade::Trade;
pub use trader::{Trader, Traders};
pub use types::{OrderId, Price, Quantity, Tick, Timestamp, TraderId};
