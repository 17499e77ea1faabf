//! Defense state snapshot — the visible state of the engine after a
//! tick, serializable for logs, tests, or a frontend.

use serde::{Deserialize, Serialize};

use crate::enums::{EnginePhase, TrackStatus};
use crate::events::DefenseEvent;
use crate::types::{GeoPoint, PointOfInterest, SimTime};

/// Complete engine state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefenseSnapshot {
    pub phase: EnginePhase,
    pub time: SimTime,
    pub tracks: Vec<TrackView>,
    pub inventory: Vec<StockView>,
    pub pois: Vec<PointOfInterest>,
    pub score: ScoreView,
    pub events: Vec<DefenseEvent>,
}

/// One observed missile as of the latest sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackView {
    pub missile_id: i64,
    pub missile_type: String,
    pub status: TrackStatus,
    pub position: GeoPoint,
    /// Epoch seconds of the latest sample.
    pub observed_at: f64,
}

/// Remaining stock of one interceptor type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockView {
    pub name: String,
    pub remaining: u32,
}

/// Running counters for the simulation session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub sweeps_processed: u64,
    pub pings_processed: u64,
    pub tracks_initiated: u64,
    pub threats_ignored: u64,
    pub interceptors_fired: u64,
    pub solutions_deferred: u64,
    pub malformed_skipped: u64,
}
