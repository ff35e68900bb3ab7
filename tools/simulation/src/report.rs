//! End-of-run summary export
//!
//! Serializes the telemetry into a compact report for external consumption.
//! The binary prints to stdout; this stays in the library so tests and other
//! tools can consume the same numbers.

use serde::{Deserialize, Serialize};
use types::numeric::Price;

use crate::telemetry::{Telemetry, BUCKET_LABELS, OFFSET_BUCKETS};

/// Fill ratio of one offset bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRatio {
    pub label: String,
    pub filled: u64,
    pub total: u64,
    pub pct: f64,
}

/// Complete end-of-run summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub version: String,
    pub events: u64,
    pub limits: u64,
    pub markets: u64,
    pub cancels: u64,
    pub trades: u64,
    pub volume: u64,
    pub avg_spread: f64,
    pub avg_mid: f64,
    pub max_drawdown_ticks: Price,
    pub mo_slip_buy_vw: f64,
    pub mo_slip_sell_vw: f64,
    pub mean_abs_offset: f64,
    pub buckets: Vec<BucketRatio>,
}

impl SimReport {
    /// Build a report from run telemetry
    pub fn from_telemetry(t: &Telemetry) -> Self {
        let buckets = (0..OFFSET_BUCKETS)
            .map(|b| BucketRatio {
                label: BUCKET_LABELS[b].to_string(),
                filled: t.lim_filled[b],
                total: t.lim_total[b],
                pct: t.fill_ratio_pct(b),
            })
            .collect();

        Self {
            version: crate::VERSION.to_string(),
            events: t.n_events,
            limits: t.n_limits,
            markets: t.n_markets,
            cancels: t.n_cancels,
            trades: t.n_trades,
            volume: t.vol_traded,
            avg_spread: t.avg_spread(),
            avg_mid: t.avg_mid(),
            max_drawdown_ticks: t.max_drawdown,
            mo_slip_buy_vw: t.slip_buy_vw(),
            mo_slip_sell_vw: t.slip_sell_vw(),
            mean_abs_offset: t.mean_abs_offset(),
            buckets,
        }
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
