//! Price, quantity, and simulation-time scalars
//!
//! Prices are integral ticks and quantities integral units, so all book
//! arithmetic is exact. Both scalars are signed: mid-relative offsets and
//! intermediate price candidates can go negative before clamping, even though
//! every resting order satisfies `limit_price >= 1` and `qty > 0`.

/// Price in ticks
///
/// A resting order always has `limit_price >= 1`; `0` is the sentinel
/// returned by best-of-book queries on an empty side.
pub type Price = i64;

/// Quantity in units
///
/// A live order always has `qty > 0`; fills decrement it and the order is
/// removed the moment it reaches zero.
pub type Qty = i64;

/// Simulation time in seconds since the start of the run
///
/// Monotonically non-decreasing across events.
pub type TimePoint = f64;
