//! Simulator determinism and post-run consistency
//!
//! Same seed, same run: every counter and derived statistic must agree
//! between two runs, and the book must pass its consistency scan afterwards.

use simulation::{SimConfig, Simulator};

fn cfg(seed: u64, max_events: usize) -> SimConfig {
    SimConfig {
        seed,
        max_events,
        snapshot_every: 0,
        ..SimConfig::default()
    }
}

#[test]
fn test_same_seed_yields_identical_runs() {
    let mut a = Simulator::new(cfg(42, 50_000));
    let mut b = Simulator::new(cfg(42, 50_000));
    a.run();
    b.run();

    let (ta, tb) = (a.telemetry(), b.telemetry());
    assert_eq!(ta.n_events, tb.n_events);
    assert_eq!(ta.n_limits, tb.n_limits);
    assert_eq!(ta.n_markets, tb.n_markets);
    assert_eq!(ta.n_cancels, tb.n_cancels);
    assert_eq!(ta.n_trades, tb.n_trades);
    assert_eq!(ta.vol_traded, tb.vol_traded);
    assert_eq!(ta.avg_spread(), tb.avg_spread());
    assert_eq!(ta.max_drawdown, tb.max_drawdown);
    assert_eq!(ta.lim_total, tb.lim_total);
    assert_eq!(ta.lim_filled, tb.lim_filled);

    assert_eq!(a.book().order_count(), b.book().order_count());
    assert_eq!(a.book().best_bid(), b.book().best_bid());
    assert_eq!(a.book().best_ask(), b.book().best_ask());
    assert_eq!(a.now(), b.now());
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = Simulator::new(cfg(42, 20_000));
    let mut b = Simulator::new(cfg(43, 20_000));
    a.run();
    b.run();

    // Counts are identical by construction only for event totals
    assert_eq!(a.telemetry().n_events, b.telemetry().n_events);
    let same_trades = a.telemetry().n_trades == b.telemetry().n_trades;
    let same_vol = a.telemetry().vol_traded == b.telemetry().vol_traded;
    let same_spread = a.telemetry().avg_spread() == b.telemetry().avg_spread();
    assert!(!(same_trades && same_vol && same_spread));
}

#[test]
fn test_book_consistent_after_run() {
    let mut sim = Simulator::new(cfg(7, 30_000));
    sim.run();

    assert!(sim.book().self_check());
    assert_eq!(sim.telemetry().n_events, 30_000);

    // Every event produced exactly one of the counted kinds
    let t = sim.telemetry();
    assert_eq!(t.n_limits + t.n_markets + t.n_cancels, t.n_events);
}

#[test]
fn test_live_registry_matches_book_after_run() {
    let mut sim = Simulator::new(cfg(11, 20_000));
    sim.run();

    assert_eq!(sim.live().len(), sim.book().order_count());
    for &id in sim.live().ids() {
        assert!(sim.book().contains(id));
    }
}

#[test]
fn test_time_advances_and_is_reported() {
    let mut sim = Simulator::new(cfg(3, 5_000));
    sim.run();

    // Positive arrival rates must move the clock forward
    assert!(sim.now() > 0.0);
}

#[test]
fn test_report_reflects_run() {
    let mut sim = Simulator::new(cfg(5, 10_000));
    sim.run();

    let report = sim.report();
    assert_eq!(report.events, 10_000);
    assert_eq!(report.trades, sim.telemetry().n_trades);
    let json = report.to_json();
    assert!(json.contains("avg_spread"));
}
