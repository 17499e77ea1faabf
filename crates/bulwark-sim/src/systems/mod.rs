//! The per-missile decision pipeline, one module per stage.
//!
//! Stages are pure functions over engine-owned state; the engine wires
//! them together each sweep: extrapolate -> classify -> plan.

pub mod classify;
pub mod extrapolate;
pub mod plan;
