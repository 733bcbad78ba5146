//! Agent-based order book simulation CLI.
//!
//! Runs a configured population of trading policies against one book and
//! prints per-trader accounting at the end.
//!
//! Usage:
//!   cargo run --bin sim --release
//!   cargo run --bin sim -- --config sim.toml --ticks 50000
//!   RUST_LOG=debug cargo run --bin sim -- --seed 7

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lobsim::{SimConfig, Simulation};

#[derive(Parser, Debug)]
#[command(name = "sim", version, about = "Agent-based limit order book simulator")]
struct Args {
    /// TOML config file; defaults apply for anything unset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the master seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut sim = Simulation::new(config);
    sim.run();
    print_summary(&mut sim);
    ExitCode::SUCCESS
}

fn load_config(args: &Args) -> lobsim::Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn print_summary(sim: &mut Simulation) {
    let trades = sim.book().trades().len();
    let last = sim.book().last_trade_price();
    let (bid, ask, _) = sim.book_mut().best_bid_ask();

    println!("\n=== Market ===");
    println!("trades executed: {trades}");
    match last {
        Some(price) => println!("last trade:      {price}"),
        None => println!("last trade:      (none)"),
    }
    match (bid, ask) {
        (Some(b), Some(a)) => println!("closing quote:   {b} / {a}"),
        _ => println!("closing quote:   (one-sided or empty)"),
    }

    println!("\n=== Traders ===");
    println!(
        "{:<14} {:>10} {:>14} {:>14}",
        "name", "inventory", "pnl", "mark-to-mkt"
    );
    for report in sim.reports() {
        println!(
            "{:<14} {:>10} {:>14} {:>14}",
            report.name,
            report.inventory,
            format_cents(report.pnl),
            format_cents(report.mark_to_market),
        );
    }
}

fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
