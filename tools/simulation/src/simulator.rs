//! Event-driven market simulator
//!
//! Owns the matching engine, the seeded PRNG, the regime state, the arrival
//! clock, and the live-order registry. Each iteration draws one event
//! (advancing the clock and possibly the regime), executes it against the
//! book, and folds the outcome into the telemetry.

use std::collections::HashMap;

use matching_engine::MatchingEngine;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use types::ids::OrderId;
use types::numeric::{Price, Qty, TimePoint};
use types::order::Side;
use types::trade::Fill;

use crate::config::{RegimeMix, SimConfig};
use crate::events::{Regime, SimEvent};
use crate::live::LiveOrders;
use crate::report::SimReport;
use crate::sampling;
use crate::telemetry::{bucket_for_offset, Telemetry, BUCKET_LABELS, OFFSET_BUCKETS};

/// Stochastic order-flow simulator over one book
pub struct Simulator {
    cfg: SimConfig,
    engine: MatchingEngine,
    rng: ChaCha8Rng,
    t_curr: TimePoint,
    regime: Regime,
    live: LiveOrders,
    telemetry: Telemetry,
    /// Offset bucket of each tracked resting limit, dropped on its first fill
    lim_bucket_by_id: HashMap<OrderId, usize>,
}

impl Simulator {
    /// Create a simulator; every random draw comes from one generator seeded
    /// with `cfg.seed`
    pub fn new(cfg: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(cfg.seed);
        Self {
            cfg,
            engine: MatchingEngine::new(),
            rng,
            t_curr: 0.0,
            regime: Regime::Low,
            live: LiveOrders::new(),
            telemetry: Telemetry::new(),
            lim_bucket_by_id: HashMap::new(),
        }
    }

    /// The engine driving the book
    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// The book itself
    pub fn book(&self) -> &matching_engine::OrderBook {
        self.engine.book()
    }

    /// Current simulation time in seconds
    pub fn now(&self) -> TimePoint {
        self.t_curr
    }

    /// Current regime
    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Telemetry accumulated so far
    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// The cancel-target registry
    pub fn live(&self) -> &LiveOrders {
        &self.live
    }

    /// Build the end-of-run report
    pub fn report(&self) -> SimReport {
        SimReport::from_telemetry(&self.telemetry)
    }

    /// Run the main loop for `cfg.max_events` events and print the summary
    pub fn run(&mut self) {
        tracing::info!(
            max_events = self.cfg.max_events,
            seed = self.cfg.seed,
            "sim start"
        );

        for i in 0..self.cfg.max_events {
            let ev = self.next_event();
            self.execute(&ev);

            if (i + 1) % 10_000 == 0 {
                tracing::info!(processed = i + 1, "sim heartbeat");
            }

            let every = self.cfg.snapshot_every as usize;
            if every > 0 && (i + 1) % every == 0 {
                let book = self.engine.book();
                println!("\n--- snapshot @{} events ---", i + 1);
                println!(
                    "best_bid={} best_ask={} mid={} resting={}",
                    book.best_bid(),
                    book.best_ask(),
                    book.mid(),
                    book.order_count(),
                );
            }
        }

        self.print_summary();
    }

    fn lambda(&self) -> f64 {
        match self.regime {
            Regime::Low => self.cfg.regime.low.lambda,
            Regime::High => self.cfg.regime.high.lambda,
        }
    }

    fn mix(&self) -> &RegimeMix {
        match self.regime {
            Regime::Low => &self.cfg.regime.low.mix,
            Regime::High => &self.cfg.regime.high.mix,
        }
    }

    /// One Markov step at the event boundary
    fn maybe_switch_regime(&mut self) {
        let p_ll = self.cfg.regime.p_ll.clamp(0.0, 1.0);
        let p_hh = self.cfg.regime.p_hh.clamp(0.0, 1.0);
        self.regime = match self.regime {
            Regime::Low => {
                if self.rng.gen_bool(p_ll) {
                    Regime::Low
                } else {
                    Regime::High
                }
            }
            Regime::High => {
                if self.rng.gen_bool(p_hh) {
                    Regime::High
                } else {
                    Regime::Low
                }
            }
        };
    }

    /// Book mid when both sides exist, otherwise the configured initial mid
    fn current_mid(&self) -> Price {
        let m = self.engine.book().mid();
        if m > 0 {
            m
        } else {
            self.cfg.initial_mid_ticks
        }
    }

    /// Pick a limit price: mid plus a two-sided offset, with the anti-cross
    /// pullback and the configured price floor
    fn decide_limit_price(&mut self, side: Side) -> Price {
        let mid = self.current_mid();
        let off = sampling::draw_two_sided_offset(
            &mut self.rng,
            self.cfg.geolap_alpha,
            self.cfg.max_offset_ticks,
        );
        let mut px = mid + off;

        let keep_cross = self.cfg.keep_cross_prob.clamp(0.0, 1.0);
        let book = self.engine.book();
        match side {
            Side::BUY => {
                if !book.asks().is_empty()
                    && px >= book.best_ask()
                    && !self.rng.gen_bool(keep_cross)
                {
                    px = Price::min(book.best_bid(), mid - off.abs());
                }
            }
            Side::SELL => {
                if !book.bids().is_empty()
                    && px <= book.best_bid()
                    && !self.rng.gen_bool(keep_cross)
                {
                    px = Price::max(book.best_ask(), mid + off.abs());
                }
            }
        }

        if px < self.cfg.min_price_ticks {
            px = self.cfg.min_price_ticks;
        }
        px
    }

    /// Draw the next event: advance the clock, step the regime, pick the
    /// type from the active mix, then draw the per-type payload
    fn next_event(&mut self) -> SimEvent {
        let lambda = self.lambda();
        self.t_curr += sampling::draw_exp(&mut self.rng, lambda);
        self.maybe_switch_regime();

        let mix = *self.mix();
        let u: f64 = self.rng.gen();
        let ts = self.t_curr;

        let c1 = mix.p_limit_buy;
        let c2 = c1 + mix.p_limit_sell;
        let c3 = c2 + mix.p_mkt_buy;
        let c4 = c3 + mix.p_mkt_sell;

        if u < c1 {
            let qty = sampling::draw_geometric_mean(&mut self.rng, self.cfg.mean_limit_qty);
            let px = self.decide_limit_price(Side::BUY);
            SimEvent::LimitBuy { px, qty, ts }
        } else if u < c2 {
            let qty = sampling::draw_geometric_mean(&mut self.rng, self.cfg.mean_limit_qty);
            let px = self.decide_limit_price(Side::SELL);
            SimEvent::LimitSell { px, qty, ts }
        } else if u < c3 {
            let qty = sampling::draw_geometric_mean(&mut self.rng, self.cfg.mean_market_qty);
            SimEvent::MktBuy { qty, ts }
        } else if u < c4 {
            let qty = sampling::draw_geometric_mean(&mut self.rng, self.cfg.mean_market_qty);
            SimEvent::MktSell { qty, ts }
        } else {
            match self.live.sample(&mut self.rng) {
                Some(id) => SimEvent::Cancel { id, ts },
                None => {
                    // Nothing to cancel; post a fresh limit instead
                    let side = if self.rng.gen_bool(0.5) { Side::BUY } else { Side::SELL };
                    let qty =
                        sampling::draw_geometric_mean(&mut self.rng, self.cfg.mean_limit_qty);
                    let px = self.decide_limit_price(side);
                    match side {
                        Side::BUY => SimEvent::LimitBuy { px, qty, ts },
                        Side::SELL => SimEvent::LimitSell { px, qty, ts },
                    }
                }
            }
        }
    }

    /// Apply one event to the book and fold the outcome into telemetry
    fn execute(&mut self, ev: &SimEvent) {
        let mut fills: Vec<Fill> = Vec::new();

        match *ev {
            SimEvent::LimitBuy { px, qty, ts } => {
                self.apply_limit(Side::BUY, px, qty, ts, &mut fills)
            }
            SimEvent::LimitSell { px, qty, ts } => {
                self.apply_limit(Side::SELL, px, qty, ts, &mut fills)
            }
            SimEvent::MktBuy { qty, ts } => self.apply_market(Side::BUY, qty, ts, &mut fills),
            SimEvent::MktSell { qty, ts } => self.apply_market(Side::SELL, qty, ts, &mut fills),
            SimEvent::Cancel { id, .. } => {
                self.engine.book_mut().cancel(id);
                self.live.remove(id);
            }
        }

        if self.cfg.log_trades {
            for f in &fills {
                tracing::info!("{}", f);
            }
        }

        // A tracked limit counts toward its bucket once, on its first fill
        for f in &fills {
            if let Some(bucket) = self.lim_bucket_by_id.remove(&f.maker_id) {
                self.telemetry.note_first_fill(bucket);
            }
        }
        // Makers consumed to zero have left the book; drop them as cancel
        // targets. Partially filled makers stay live.
        for f in &fills {
            if !self.engine.book().contains(f.maker_id) {
                self.live.remove(f.maker_id);
            }
        }

        self.telemetry.note_event(ev);
        let book = self.engine.book();
        if !book.bids().is_empty() && !book.asks().is_empty() {
            self.telemetry.observe_top_of_book(book.best_bid(), book.best_ask());
        }
        self.telemetry.note_trades(&fills);
    }

    fn apply_limit(&mut self, side: Side, px: Price, qty: Qty, ts: TimePoint, fills: &mut Vec<Fill>) {
        // Offset-from-mid telemetry, using the book as seen at submission
        let book = self.engine.book();
        let mut k: i64 = 0;
        if !book.bids().is_empty() && !book.asks().is_empty() {
            let mid = (book.best_bid() + book.best_ask()) / 2;
            let off = match side {
                Side::BUY => px - mid,
                Side::SELL => mid - px,
            };
            k = off.abs();
            if self.cfg.max_offset_ticks > 0 && k > self.cfg.max_offset_ticks {
                k = self.cfg.max_offset_ticks;
            }
            self.telemetry.note_limit_offset(k as u64);
        }

        let bucket = bucket_for_offset(k);
        self.telemetry.note_limit_submitted(bucket);

        match self.engine.submit_limit(side, px, qty, ts, fills) {
            Ok(id) => {
                if self.engine.book().contains(id) {
                    self.lim_bucket_by_id.insert(id, bucket);
                    self.live.insert(id);
                }
            }
            Err(err) => {
                tracing::error!(%err, ?side, px, qty, "limit submission rejected");
            }
        }
    }

    fn apply_market(&mut self, side: Side, qty: Qty, ts: TimePoint, fills: &mut Vec<Fill>) {
        let mid0 = self.current_mid();
        match self.engine.submit_market(side, qty, ts, fills) {
            Ok(_) => self.telemetry.note_market_fills(side, mid0, fills),
            Err(err) => {
                tracing::error!(%err, ?side, qty, "market submission rejected");
            }
        }
    }

    fn print_summary(&self) {
        let t = &self.telemetry;
        println!(
            "avg_mid={} max_drawdown_ticks={} mo_slip_buy_vw={} mo_slip_sell_vw={}",
            t.avg_mid(),
            t.max_drawdown,
            t.slip_buy_vw(),
            t.slip_sell_vw(),
        );

        for b in 0..OFFSET_BUCKETS {
            println!(
                "limit_fill_ratio_bucket[{}] {}/{} ({}%)",
                BUCKET_LABELS[b],
                t.lim_filled[b],
                t.lim_total[b],
                t.fill_ratio_pct(b),
            );
        }

        println!();
        println!("=== SIM DONE ===");
        println!(
            "events={} limits={} markets={} cancels={} trades={} vol={} avg_spread={}",
            t.n_events,
            t.n_limits,
            t.n_markets,
            t.n_cancels,
            t.n_trades,
            t.vol_traded,
            t.avg_spread(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RegimeConfig, RegimeMix, RegimeParams};

    fn small_cfg(max_events: usize) -> SimConfig {
        SimConfig {
            max_events,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_clock_is_nondecreasing() {
        let mut sim = Simulator::new(small_cfg(0));
        let mut last = sim.now();
        for _ in 0..200 {
            let ev = sim.next_event();
            assert!(ev.ts() >= last);
            assert_eq!(ev.ts(), sim.now());
            last = ev.ts();
        }
        assert!(sim.now() > 0.0);
    }

    #[test]
    fn test_cancel_with_no_live_orders_falls_back_to_limit() {
        let cancel_only = RegimeMix {
            p_limit_buy: 0.0,
            p_limit_sell: 0.0,
            p_mkt_buy: 0.0,
            p_mkt_sell: 0.0,
            p_cancel: 1.0,
        };
        let mut cfg = small_cfg(0);
        cfg.regime = RegimeConfig {
            low: RegimeParams { lambda: 800.0, mix: cancel_only },
            high: RegimeParams { lambda: 2000.0, mix: cancel_only },
            ..RegimeConfig::default()
        };

        let mut sim = Simulator::new(cfg);
        let ev = sim.next_event();
        assert!(matches!(
            ev,
            SimEvent::LimitBuy { .. } | SimEvent::LimitSell { .. }
        ));
    }

    #[test]
    fn test_limit_price_respects_floor() {
        let mut cfg = small_cfg(0);
        cfg.initial_mid_ticks = 2;
        cfg.min_price_ticks = 1;
        cfg.max_offset_ticks = 50;

        let mut sim = Simulator::new(cfg);
        for _ in 0..200 {
            let px = sim.decide_limit_price(Side::BUY);
            assert!(px >= 1);
            let px = sim.decide_limit_price(Side::SELL);
            assert!(px >= 1);
        }
    }

    #[test]
    fn test_execute_limit_registers_resting_order() {
        let mut sim = Simulator::new(small_cfg(0));
        let ev = SimEvent::LimitBuy { px: 10_000, qty: 5, ts: 0.1 };
        sim.execute(&ev);

        assert_eq!(sim.telemetry().n_events, 1);
        assert_eq!(sim.telemetry().n_limits, 1);
        assert_eq!(sim.live().len(), 1);
        let id = sim.live().ids()[0];
        assert!(sim.book().contains(id));
    }

    #[test]
    fn test_execute_cancel_removes_from_live_set() {
        let mut sim = Simulator::new(small_cfg(0));
        sim.execute(&SimEvent::LimitBuy { px: 10_000, qty: 5, ts: 0.1 });
        let id = sim.live().ids()[0];

        sim.execute(&SimEvent::Cancel { id, ts: 0.2 });
        assert!(sim.live().is_empty());
        assert!(!sim.book().contains(id));
        assert_eq!(sim.telemetry().n_cancels, 1);
    }

    #[test]
    fn test_fully_consumed_maker_leaves_live_set() {
        let mut sim = Simulator::new(small_cfg(0));
        sim.execute(&SimEvent::LimitSell { px: 10_001, qty: 3, ts: 0.1 });
        let maker = sim.live().ids()[0];

        sim.execute(&SimEvent::MktBuy { qty: 3, ts: 0.2 });
        assert!(!sim.live().contains(maker));
        assert!(!sim.book().contains(maker));
        assert_eq!(sim.telemetry().n_trades, 1);
        assert_eq!(sim.telemetry().vol_traded, 3);
    }

    #[test]
    fn test_partially_filled_maker_stays_live() {
        let mut sim = Simulator::new(small_cfg(0));
        sim.execute(&SimEvent::LimitSell { px: 10_001, qty: 10, ts: 0.1 });
        let maker = sim.live().ids()[0];

        sim.execute(&SimEvent::MktBuy { qty: 4, ts: 0.2 });
        assert!(sim.live().contains(maker));
        assert!(sim.book().contains(maker));
    }

    #[test]
    fn test_first_fill_counts_bucket_once() {
        let mut sim = Simulator::new(small_cfg(0));
        // Two-sided book so offsets are measured
        sim.execute(&SimEvent::LimitBuy { px: 9_999, qty: 5, ts: 0.1 });
        sim.execute(&SimEvent::LimitSell { px: 10_001, qty: 10, ts: 0.2 });

        // Two partial hits on the same resting ask
        sim.execute(&SimEvent::MktBuy { qty: 2, ts: 0.3 });
        sim.execute(&SimEvent::MktBuy { qty: 2, ts: 0.4 });

        let filled: u64 = sim.telemetry().lim_filled.iter().sum();
        assert_eq!(filled, 1);
    }

    #[test]
    fn test_run_smoke() {
        let mut sim = Simulator::new(small_cfg(2_000));
        sim.run();

        assert_eq!(sim.telemetry().n_events, 2_000);
        assert!(sim.book().self_check());
        // The live registry agrees with the book
        assert_eq!(sim.live().len(), sim.book().order_count());
        for &id in sim.live().ids() {
            assert!(sim.book().contains(id));
        }
    }
}
