//! Simulation configuration
//!
//! Defaults carry the reference parameter set used by the demo run: a calm
//! regime with mostly passive flow and a fast regime with a heavier market-
//! order share.

use serde::{Deserialize, Serialize};
use types::numeric::Price;

/// Event-type probabilities for one regime
///
/// Intended to sum to 1; selection walks the cumulative thresholds in field
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeMix {
    pub p_limit_buy: f64,
    pub p_limit_sell: f64,
    pub p_mkt_buy: f64,
    pub p_mkt_sell: f64,
    pub p_cancel: f64,
}

/// Arrival rate and event mix for one regime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeParams {
    /// Events per second while this regime is active
    pub lambda: f64,
    pub mix: RegimeMix,
}

/// Two-state Markov chain over the Low/High regimes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeConfig {
    /// Probability of staying in Low at an event boundary
    pub p_ll: f64,
    /// Probability of staying in High at an event boundary
    pub p_hh: f64,
    pub low: RegimeParams,
    pub high: RegimeParams,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            p_ll: 0.995,
            p_hh: 0.990,
            low: RegimeParams {
                lambda: 800.0,
                mix: RegimeMix {
                    p_limit_buy: 0.35,
                    p_limit_sell: 0.35,
                    p_mkt_buy: 0.10,
                    p_mkt_sell: 0.10,
                    p_cancel: 0.10,
                },
            },
            high: RegimeParams {
                lambda: 2000.0,
                mix: RegimeMix {
                    p_limit_buy: 0.28,
                    p_limit_sell: 0.28,
                    p_mkt_buy: 0.18,
                    p_mkt_sell: 0.18,
                    p_cancel: 0.08,
                },
            },
        }
    }
}

/// Full simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// PRNG seed; one generator serves every draw in the run
    pub seed: u64,
    /// Number of events to simulate
    pub max_events: usize,
    /// Emit a book snapshot every N events (0 disables)
    pub snapshot_every: u32,
    pub regime: RegimeConfig,

    /// Mean of the shifted-geometric limit-order quantity
    pub mean_limit_qty: f64,
    /// Mean of the shifted-geometric market-order quantity
    pub mean_market_qty: f64,

    /// Mid used for pricing while either side of the book is empty
    pub initial_mid_ticks: Price,
    /// Floor applied to every generated limit price
    pub min_price_ticks: Price,
    /// Cap on the |offset from mid| of generated limit prices (0 disables)
    pub max_offset_ticks: i64,
    /// Geometric parameter of the two-sided offset draw, clamped to (0, 1]
    pub geolap_alpha: f64,
    /// Probability of letting a crossing limit candidate stand
    pub keep_cross_prob: f64,

    /// Log each fill as it happens
    pub log_trades: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_events: 200_000,
            snapshot_every: 0,
            regime: RegimeConfig::default(),
            mean_limit_qty: 50.0,
            mean_market_qty: 50.0,
            initial_mid_ticks: 10_000,
            min_price_ticks: 1,
            max_offset_ticks: 50,
            geolap_alpha: 0.15,
            keep_cross_prob: 0.15,
            log_trades: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mixes_sum_to_one() {
        let cfg = RegimeConfig::default();
        for mix in [cfg.low.mix, cfg.high.mix] {
            let total =
                mix.p_limit_buy + mix.p_limit_sell + mix.p_mkt_buy + mix.p_mkt_sell + mix.p_cancel;
            assert!((total - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let cfg = SimConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
