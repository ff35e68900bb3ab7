//! Online simulation telemetry
//!
//! Counters and aggregates updated as each event executes: event/trade
//! counts, spread and mid statistics with peak-to-trough drawdown, VWAP
//! slippage of market orders against the pre-trade mid, and fill ratios of
//! limit orders bucketed by their offset from mid at submission time.

use serde::{Deserialize, Serialize};
use types::numeric::Price;
use types::order::Side;
use types::trade::Fill;

use crate::events::SimEvent;

/// Number of offset buckets for the limit fill-ratio table
pub const OFFSET_BUCKETS: usize = 5;

/// Human-readable bucket labels, in tick distance from mid
pub const BUCKET_LABELS: [&str; OFFSET_BUCKETS] = ["0", "1-2", "3-5", "6-10", ">10"];

/// Width of the |offset| histogram in ticks
pub const OFFSET_HIST_BINS: usize = 64;

/// Map an absolute offset-from-mid (ticks) to its bucket
pub fn bucket_for_offset(k: i64) -> usize {
    if k <= 0 {
        0
    } else if k <= 2 {
        1
    } else if k <= 5 {
        2
    } else if k <= 10 {
        3
    } else {
        4
    }
}

/// Aggregated run telemetry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub n_events: u64,
    pub n_limits: u64,
    pub n_markets: u64,
    pub n_cancels: u64,
    pub n_trades: u64,
    pub vol_traded: u64,

    /// Spread/mid aggregates, sampled only when both sides are non-empty
    pub sum_spread: f64,
    pub sum_mid: f64,
    pub mid_samples: u64,
    pub peak_mid: Price,
    pub max_drawdown: Price,

    /// VWAP slippage accumulators: `slip_per_unit * qty`, plus the qty
    pub mo_buy_slip: f64,
    pub mo_buy_qty: u64,
    pub mo_sell_slip: f64,
    pub mo_sell_qty: u64,

    /// |offset from mid| statistics for submitted limits
    pub limit_offset_count: u64,
    pub limit_offset_abs_sum: u64,
    pub limit_offset_hist: Vec<u64>,

    /// Limits created / limits ever filled, per offset bucket
    pub lim_total: [u64; OFFSET_BUCKETS],
    pub lim_filled: [u64; OFFSET_BUCKETS],
}

impl Telemetry {
    /// Create zeroed telemetry
    pub fn new() -> Self {
        Self {
            n_events: 0,
            n_limits: 0,
            n_markets: 0,
            n_cancels: 0,
            n_trades: 0,
            vol_traded: 0,
            sum_spread: 0.0,
            sum_mid: 0.0,
            mid_samples: 0,
            peak_mid: 0,
            max_drawdown: 0,
            mo_buy_slip: 0.0,
            mo_buy_qty: 0,
            mo_sell_slip: 0.0,
            mo_sell_qty: 0,
            limit_offset_count: 0,
            limit_offset_abs_sum: 0,
            limit_offset_hist: vec![0; OFFSET_HIST_BINS],
            lim_total: [0; OFFSET_BUCKETS],
            lim_filled: [0; OFFSET_BUCKETS],
        }
    }

    /// Count one executed event by kind
    pub fn note_event(&mut self, event: &SimEvent) {
        self.n_events += 1;
        match event {
            SimEvent::LimitBuy { .. } | SimEvent::LimitSell { .. } => self.n_limits += 1,
            SimEvent::MktBuy { .. } | SimEvent::MktSell { .. } => self.n_markets += 1,
            SimEvent::Cancel { .. } => self.n_cancels += 1,
        }
    }

    /// Record a submitted limit's capped |offset from mid|
    pub fn note_limit_offset(&mut self, k: u64) {
        self.limit_offset_count += 1;
        self.limit_offset_abs_sum += k;
        if (k as usize) < self.limit_offset_hist.len() {
            self.limit_offset_hist[k as usize] += 1;
        }
    }

    /// Count a limit submission into its offset bucket
    pub fn note_limit_submitted(&mut self, bucket: usize) {
        self.lim_total[bucket] += 1;
    }

    /// Count a tracked limit's first fill; a limit contributes at most once
    pub fn note_first_fill(&mut self, bucket: usize) {
        self.lim_filled[bucket] += 1;
    }

    /// Sample the top of book; caller guarantees both sides are non-empty
    pub fn observe_top_of_book(&mut self, best_bid: Price, best_ask: Price) {
        let mid = (best_bid + best_ask) / 2;
        self.sum_spread += (best_ask - best_bid) as f64;
        self.sum_mid += mid as f64;
        self.mid_samples += 1;

        if mid > self.peak_mid {
            self.peak_mid = mid;
        }
        let dd = self.peak_mid - mid;
        if dd > self.max_drawdown {
            self.max_drawdown = dd;
        }
    }

    /// Accumulate a market order's VWAP slippage against the pre-trade mid
    pub fn note_market_fills(&mut self, taker_side: Side, mid0: Price, fills: &[Fill]) {
        let mut vsum = 0.0;
        let mut qsum: u64 = 0;
        for f in fills {
            vsum += f.price as f64 * f.qty as f64;
            qsum += f.qty as u64;
        }
        if qsum == 0 {
            return;
        }
        let vwap = vsum / qsum as f64;
        match taker_side {
            Side::BUY => {
                // A buy paying above mid slips positive
                self.mo_buy_slip += (vwap - mid0 as f64) * qsum as f64;
                self.mo_buy_qty += qsum;
            }
            Side::SELL => {
                self.mo_sell_slip += (mid0 as f64 - vwap) * qsum as f64;
                self.mo_sell_qty += qsum;
            }
        }
    }

    /// Count trades and traded volume from a submission's fills
    pub fn note_trades(&mut self, fills: &[Fill]) {
        for f in fills {
            self.n_trades += 1;
            self.vol_traded += f.qty as u64;
        }
    }

    /// Average spread over all events (including one-sided-book events)
    pub fn avg_spread(&self) -> f64 {
        if self.n_events == 0 {
            return 0.0;
        }
        self.sum_spread / self.n_events as f64
    }

    /// Average mid over the events where both sides were present
    pub fn avg_mid(&self) -> f64 {
        if self.mid_samples == 0 {
            return 0.0;
        }
        self.sum_mid / self.mid_samples as f64
    }

    /// VWAP-weighted slippage per unit for market buys
    pub fn slip_buy_vw(&self) -> f64 {
        if self.mo_buy_qty == 0 {
            return 0.0;
        }
        self.mo_buy_slip / self.mo_buy_qty as f64
    }

    /// VWAP-weighted slippage per unit for market sells
    pub fn slip_sell_vw(&self) -> f64 {
        if self.mo_sell_qty == 0 {
            return 0.0;
        }
        self.mo_sell_slip / self.mo_sell_qty as f64
    }

    /// Fill ratio of one offset bucket as a percentage
    pub fn fill_ratio_pct(&self, bucket: usize) -> f64 {
        if self.lim_total[bucket] == 0 {
            return 0.0;
        }
        100.0 * self.lim_filled[bucket] as f64 / self.lim_total[bucket] as f64
    }

    /// Mean |offset| of submitted limits in ticks
    pub fn mean_abs_offset(&self) -> f64 {
        if self.limit_offset_count == 0 {
            return 0.0;
        }
        self.limit_offset_abs_sum as f64 / self.limit_offset_count as f64
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
