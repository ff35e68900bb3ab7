//! Fill (execution) records
//!
//! A `Fill` is one maker/taker execution. One submission can produce many
//! fills, emitted best-price-first and FIFO within a level.

use crate::ids::OrderId;
use crate::numeric::{Price, Qty, TimePoint};
use crate::order::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An atomic execution between a resting maker and an incoming taker
///
/// `price` is always the maker's posted level, and `taker_side` is the side
/// of the aggressor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub taker_id: OrderId,
    pub maker_id: OrderId,
    pub taker_side: Side,
    pub price: Price,
    pub qty: Qty,
    pub ts: TimePoint,
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRADE taker={} maker={} side={} px={} qty={} t={}",
            self.taker_id,
            self.maker_id,
            if self.taker_side == Side::BUY { "B" } else { "S" },
            self.price,
            self.qty,
            self.ts,
        )
    }
}
