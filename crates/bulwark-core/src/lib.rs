//! Core types and definitions for the Bulwark defender simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types and predicates, unit-conversion tables, wire
//! payloads, configuration, state snapshots, events, and the error
//! taxonomy. It has no dependency on any runtime framework.

pub mod config;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod protocol;
pub mod specs;
pub mod state;
pub mod timefmt;
pub mod types;
