//! Matching logic module
//!
//! Contains the crossing (limit gate) predicates used by the engine's
//! level walk.

pub mod crossing;
