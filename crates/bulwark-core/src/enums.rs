//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an observed hostile missile.
///
/// Transitions are monotonic: `New -> Active -> Solved`. A solved track
/// is terminal and never reactivated for the same missile id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackStatus {
    /// Constructed but not yet pinged.
    #[default]
    New,
    /// At least one radar sample on record; still being evaluated.
    Active,
    /// Response decided: intercepted, filtered as non-threatening, or
    /// already past every battery.
    Solved,
}

/// Category of a protected or launch-capable point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoiCategory {
    /// Interceptor launch site.
    Battery,
    /// Protected location (city or similar).
    Target,
}

/// Top-level state of the defense control loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    #[default]
    Idle,
    /// Region, inventory, and collaborator connections are set up.
    Initialized,
    /// Control loop ticking; attackers notified of simulation start.
    Running,
    /// Inventory depleted; attackers notified of simulation end.
    Finished,
}
