//! Fundamental geometric and simulation types.
//!
//! All horizontal coordinates are geographic degrees (lon = East,
//! lat = North). Altitude is normalized into the same degree unit at the
//! ingest boundary so 3D distances are uniform across axes.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position: longitude, latitude, altitude — all in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
    pub alt: f64,
}

/// 3D velocity in degrees per second, one component per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoVelocity {
    pub lon: f64,
    pub lat: f64,
    pub alt: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64, alt: f64) -> Self {
        Self { lon, lat, alt }
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.lon, self.lat, self.alt)
    }

    /// Full 3D distance to another point (degrees).
    pub fn range3d_to(&self, other: &GeoPoint) -> f64 {
        (other.to_dvec3() - self.to_dvec3()).length()
    }

    /// Horizontal distance, ignoring altitude (degrees).
    pub fn horizontal_range_to(&self, other: &GeoPoint) -> f64 {
        let dx = other.lon - self.lon;
        let dy = other.lat - self.lat;
        (dx * dx + dy * dy).sqrt()
    }

    /// Displace this point by a velocity applied for `secs` seconds.
    pub fn advanced_by(&self, velocity: &GeoVelocity, secs: f64) -> GeoPoint {
        GeoPoint {
            lon: self.lon + velocity.lon * secs,
            lat: self.lat + velocity.lat * secs,
            alt: self.alt + velocity.alt * secs,
        }
    }
}

impl GeoVelocity {
    pub fn new(lon: f64, lat: f64, alt: f64) -> Self {
        Self { lon, lat, alt }
    }

    /// Speed magnitude (degrees/s).
    pub fn speed(&self) -> f64 {
        DVec3::new(self.lon, self.lat, self.alt).length()
    }
}

/// Simulation time tracking: tick counter plus the epoch-seconds clock
/// value the tick ran against.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Ticks completed since the engine entered `Running`.
    pub tick: u64,
    /// Clock value (seconds) supplied to the most recent tick.
    pub now_secs: f64,
}

impl SimTime {
    /// Record one completed tick at the given clock value.
    pub fn advance(&mut self, now_secs: f64) {
        self.tick += 1;
        self.now_secs = now_secs;
    }
}

/// A protected location or interceptor battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: i64,
    pub category: crate::enums::PoiCategory,
    pub position: GeoPoint,
}

/// A committed plan to launch one interceptor at a predicted missile
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireSolution {
    pub target_missile_id: i64,
    /// Interceptor type name, drawn from the inventory ledger.
    pub interceptor: String,
    /// Battery the interceptor launches from.
    pub battery: GeoPoint,
    /// Launch moment (epoch seconds). Always `impact_time - lead`.
    pub launch_time_secs: f64,
    /// Predicted meeting point, degrees on all axes.
    pub impact_point: GeoPoint,
    /// Moment the target reaches the meeting point (epoch seconds).
    pub impact_time_secs: f64,
}
