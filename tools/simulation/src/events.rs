//! Regimes and simulated events

use serde::{Deserialize, Serialize};
use types::ids::OrderId;
use types::numeric::{Price, Qty, TimePoint};

/// Hidden market state driving arrival rate and event mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    Low,
    High,
}

/// One simulated event, carrying only the fields its type needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    LimitBuy { px: Price, qty: Qty, ts: TimePoint },
    LimitSell { px: Price, qty: Qty, ts: TimePoint },
    MktBuy { qty: Qty, ts: TimePoint },
    MktSell { qty: Qty, ts: TimePoint },
    Cancel { id: OrderId, ts: TimePoint },
}

impl SimEvent {
    /// Timestamp stamped on the event at draw time
    pub fn ts(&self) -> TimePoint {
        match *self {
            SimEvent::LimitBuy { ts, .. }
            | SimEvent::LimitSell { ts, .. }
            | SimEvent::MktBuy { ts, .. }
            | SimEvent::MktSell { ts, .. }
            | SimEvent::Cancel { ts, .. } => ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ts_accessor() {
        let ev = SimEvent::LimitBuy { px: 100, qty: 5, ts: 1.5 };
        assert_eq!(ev.ts(), 1.5);
        let ev = SimEvent::Cancel { id: 9, ts: 2.5 };
        assert_eq!(ev.ts(), 2.5);
    }

    #[test]
    fn test_event_serialization_roundtrip() {
        let ev = SimEvent::MktSell { qty: 12, ts: 0.25 };
        let json = serde_json::to_string(&ev).unwrap();
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
