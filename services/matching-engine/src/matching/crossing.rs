//! Crossing detection logic
//!
//! Determines whether a taker may consume a level on the opposite side.
//! Market orders carry no limit and pass unconditionally.

use types::numeric::Price;
use types::order::Side;

/// Check whether a taker's limit allows it to take the given level
///
/// A buyer stops once the level price rises above its limit; a seller stops
/// once the level price drops below its limit. `None` means market order.
pub fn taker_can_take(taker_side: Side, limit_px: Option<Price>, level_px: Price) -> bool {
    match (taker_side, limit_px) {
        (_, None) => true,
        (Side::BUY, Some(limit)) => limit >= level_px,
        (Side::SELL, Some(limit)) => limit <= level_px,
    }
}
