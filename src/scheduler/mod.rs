//! Monthly rotation scheduling.
//!
//! # Algorithm
//!
//! `RotationEngine` walks the month day by day and, for each group, assigns
//! one member with a greedy, deterministic selection policy. It never
//! backtracks: a month either satisfies every minimum or is rejected as a
//! whole.
//!
//! Fairness reporting lives in [`ledger`](crate::ledger), which the engine
//! writes to as it goes.

mod rotation;

pub use rotation::RotationEngine;
