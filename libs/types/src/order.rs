//! Order sides, types, and the resting-order record

use crate::ids::OrderId;
use crate::numeric::{Price, Qty, TimePoint};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

/// Order type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrdType {
    /// Priced order; rests if not immediately marketable
    Limit,
    /// Unpriced order; consumes liquidity, never rests
    Market,
    /// Removal of a resting order by id
    Cancel,
}

/// A single order as held in the book
///
/// `limit_price` is immutable once posted and ignored for market orders.
/// `qty` is the *remaining* quantity: fills decrement it in place and the
/// order leaves the book when it reaches zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub ord_type: OrdType,
    pub limit_price: Price,
    pub qty: Qty,
    pub ts: TimePoint,
}

impl Order {
    /// Create a limit order
    pub fn limit(id: OrderId, side: Side, limit_price: Price, qty: Qty, ts: TimePoint) -> Self {
        Self {
            id,
            side,
            ord_type: OrdType::Limit,
            limit_price,
            qty,
            ts,
        }
    }
}
