//! Stochastic market simulator
//!
//! Drives a single-symbol limit order book with an event stream drawn from a
//! Markov-switching regime model: Poisson arrivals, a per-regime event mix,
//! discrete-Laplace limit-price offsets around mid, geometric quantities,
//! and uniform cancel targeting over the set of live orders.
//!
//! # Modules
//! - `config` — simulation and regime parameters
//! - `events` — regimes and the per-event payload enum
//! - `sampling` — the individual random draws
//! - `live` — O(1) registry of cancellable (resting) order ids
//! - `telemetry` — online counters, slippage, drawdown, fill-ratio buckets
//! - `report` — serializable end-of-run summary
//! - `simulator` — the event loop

pub mod config;
pub mod events;
pub mod sampling;
pub mod live;
pub mod telemetry;
pub mod report;
pub mod simulator;

pub use config::{RegimeConfig, RegimeMix, RegimeParams, SimConfig};
pub use events::{Regime, SimEvent};
pub use report::SimReport;
pub use simulator::Simulator;

/// Crate version constant
pub const VERSION: &str = "1.0.0";
