//! Order identifiers
//!
//! Order ids are plain monotonic integers handed out by the matching engine
//! at submission time. They are never reused within a run, which makes them
//! stable keys for the book index and the simulator's live-order registry.

/// Unique identifier for an order
///
/// Assigned by the matching engine starting at 1 and strictly increasing.
/// An id is returned to the caller even when the order is fully consumed on
/// arrival and never rests.
pub type OrderId = u64;
