//! market-sim binary
//!
//! Runs the stochastic simulation (with `--run-sim`) and then a short demo
//! that exercises the book and matcher end to end, printing the book and the
//! fills at each step. Exits non-zero if any consistency scan fails.

use anyhow::bail;
use clap::Parser;
use matching_engine::{MatchingEngine, OrderBook};
use simulation::{SimConfig, Simulator};
use types::prelude::*;

/// CLI surface; unrecognized flags are ignored rather than fatal
#[derive(Parser, Debug)]
#[command(name = "market-sim", ignore_errors = true)]
struct Cli {
    /// Run the stochastic simulation phase
    #[arg(long)]
    run_sim: bool,

    /// Number of simulated events
    #[arg(long, default_value_t = 200_000)]
    events: usize,

    /// PRNG seed for the simulation
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn dump_book(book: &OrderBook) {
    println!("================ BOOK ================");
    println!("ASKS (low→high):");
    for (px, level) in book.asks().iter() {
        let orders: Vec<String> = level.iter().map(|o| format!("{}:{}", o.id, o.qty)).collect();
        println!("  {} : [{}]", px, orders.join(", "));
    }
    println!("BIDS (high→low):");
    for (px, level) in book.bids().iter() {
        let orders: Vec<String> = level.iter().map(|o| format!("{}:{}", o.id, o.qty)).collect();
        println!("  {} : [{}]", px, orders.join(", "));
    }
    println!(
        "best_bid={} best_ask={} mid={}",
        book.best_bid(),
        book.best_ask(),
        book.mid()
    );
    println!("======================================");
}

fn dump_fills(fills: &[Fill]) {
    for f in fills {
        println!("{f}");
    }
    if fills.is_empty() {
        println!("(no trades)");
    }
}

/// Book demo: adds, cancels (known, unknown, last-at-level), duplicate-id
/// rejection, and consistency scans after every step
fn run_book_demo() -> anyhow::Result<()> {
    let mut book = OrderBook::new();

    book.add_limit(&Order::limit(101, Side::BUY, 100, 5, 0.10))?;
    book.add_limit(&Order::limit(102, Side::BUY, 100, 3, 0.20))?;
    book.add_limit(&Order::limit(103, Side::BUY, 99, 7, 0.30))?;
    book.add_limit(&Order::limit(201, Side::SELL, 102, 4, 0.15))?;
    book.add_limit(&Order::limit(202, Side::SELL, 103, 6, 0.25))?;
    book.add_limit(&Order::limit(203, Side::SELL, 102, 2, 0.35))?;

    if !book.self_check() {
        bail!("self_check failed after adds");
    }
    println!("After adds:");
    dump_book(&book);

    book.cancel(102);
    book.cancel(201);
    if !book.self_check() {
        bail!("self_check failed after cancels");
    }
    println!("\nAfter cancels (102, 201):");
    dump_book(&book);

    book.cancel(999);
    if !book.self_check() {
        bail!("self_check failed after cancel(999)");
    }
    println!("\nAfter cancel(999) (no-op):");
    dump_book(&book);

    // Duplicate id must be rejected without touching the book
    match book.add_limit(&Order::limit(101, Side::BUY, 100, 1, 0.5)) {
        Err(BookError::DuplicateId(101)) => {}
        other => bail!("expected duplicate-id rejection, got {:?}", other),
    }

    book.cancel(424242);
    if !book.self_check() {
        bail!("self_check failed after cancel(424242)");
    }

    // Cancelling the last order at a level erases the level
    book.add_limit(&Order::limit(300, Side::SELL, 105, 2, 1.0))?;
    book.cancel(300);
    if book.asks().contains(105) {
        bail!("level 105 not erased");
    }

    Ok(())
}

/// Matching demo: a crossing limit sweeping two ask levels, then a market
/// order walking the bids
fn run_matching_demo() -> anyhow::Result<()> {
    println!("\n===== Matching Engine Demo =====");
    let mut engine = MatchingEngine::new();
    let mut fills = Vec::new();

    engine.submit_limit(Side::SELL, 101, 5, 0.1, &mut fills)?;
    engine.submit_limit(Side::SELL, 102, 3, 0.2, &mut fills)?;
    engine.submit_limit(Side::BUY, 99, 4, 0.3, &mut fills)?;
    engine.submit_limit(Side::BUY, 100, 6, 0.4, &mut fills)?;

    println!("Initial book:");
    dump_book(engine.book());

    let mut fills1 = Vec::new();
    engine.submit_limit(Side::BUY, 102, 8, 1.0, &mut fills1)?;
    println!("\nAfter BUY limit @102 x8:");
    dump_fills(&fills1);
    dump_book(engine.book());

    let mut fills2 = Vec::new();
    engine.submit_market(Side::SELL, 7, 2.0, &mut fills2)?;
    println!("\nAfter MARKET SELL x7:");
    dump_fills(&fills2);
    dump_book(engine.book());

    if !engine.book().self_check() {
        bail!("self_check failed after matching demo");
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if cli.run_sim {
        let cfg = SimConfig {
            max_events: cli.events,
            seed: cli.seed,
            ..SimConfig::default()
        };
        let mut sim = Simulator::new(cfg);
        sim.run();
    }

    run_book_demo()?;
    run_matching_demo()?;

    Ok(())
}
