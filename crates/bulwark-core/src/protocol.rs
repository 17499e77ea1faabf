//! Wire payloads exchanged with attacker collaborators.
//!
//! Inbound shapes are parsed leniently: a sweep feature missing expected
//! fields yields `MalformedPayload` for that item only, and processing
//! continues with the next one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{degrees_to_meters, meters_to_degrees};
use crate::errors::DefenseError;
use crate::geometry::Polygon;
use crate::timefmt::{clock_to_secs, format_order_time};
use crate::types::{FireSolution, GeoPoint};

/// One radar observation after ingest normalization: altitude converted
/// to degrees, clock string converted to seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub missile_id: i64,
    pub position: GeoPoint,
    pub time_secs: f64,
    pub missile_type: String,
}

/// A radar sweep result as received from an attacker.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RadarSweep {
    #[serde(default)]
    pub features: Vec<SweepFeature>,
}

impl RadarSweep {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn parse(raw: &str) -> Result<Self, DefenseError> {
        serde_json::from_str(raw).map_err(DefenseError::malformed)
    }
}

/// One GeoJSON-shaped feature of a radar sweep. Every field is optional
/// at the wire level; `observation` enforces presence.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SweepFeature {
    pub id: Option<i64>,
    pub geometry: Option<SweepGeometry>,
    pub properties: Option<SweepProperties>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SweepGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SweepProperties {
    /// Altitude in meters; converted to degrees at ingest.
    pub altitude: Option<f64>,
    /// Clock string, "hour:minute:second".
    pub current_time: Option<String>,
    pub missile_type: Option<String>,
}

impl SweepFeature {
    /// Validate and normalize into an `Observation`.
    pub fn observation(&self) -> Result<Observation, DefenseError> {
        let missile_id = self
            .id
            .ok_or_else(|| DefenseError::malformed("sweep feature missing id"))?;
        let geometry = self
            .geometry
            .as_ref()
            .ok_or_else(|| DefenseError::malformed("sweep feature missing geometry"))?;
        if geometry.coordinates.len() < 2 {
            return Err(DefenseError::malformed(
                "sweep geometry needs [lon, lat] coordinates",
            ));
        }
        let properties = self
            .properties
            .as_ref()
            .ok_or_else(|| DefenseError::malformed("sweep feature missing properties"))?;
        let altitude_m = properties
            .altitude
            .ok_or_else(|| DefenseError::malformed("sweep feature missing altitude"))?;
        let clock = properties
            .current_time
            .as_deref()
            .ok_or_else(|| DefenseError::malformed("sweep feature missing current_time"))?;
        let missile_type = properties
            .missile_type
            .clone()
            .ok_or_else(|| DefenseError::malformed("sweep feature missing missile_type"))?;

        Ok(Observation {
            missile_id,
            position: GeoPoint::new(
                geometry.coordinates[0],
                geometry.coordinates[1],
                meters_to_degrees(altitude_m),
            ),
            time_secs: clock_to_secs(clock)?,
            missile_type,
        })
    }
}

/// A protected city from the register manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPoint {
    pub id: i64,
    pub position: GeoPoint,
}

/// Everything the attacker hands over at registration: team identity,
/// the assigned region, the cities to protect, and the interceptor
/// arsenal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterManifest {
    pub team_id: i64,
    pub region: Polygon,
    pub cities: Vec<CityPoint>,
    /// Interceptor name -> starting count.
    pub arsenal: BTreeMap<String, u32>,
}

impl RegisterManifest {
    /// Parse the attacker's register response. Cities given as 2D points
    /// get altitude zero; the arsenal's aggregate "total" entry is
    /// dropped.
    pub fn from_json(raw: &Value) -> Result<Self, DefenseError> {
        let team_id = raw
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| DefenseError::malformed("register response missing id"))?;

        let ring_value = raw
            .pointer("/region/features/0/geometry/coordinates/0")
            .ok_or_else(|| DefenseError::malformed("register response missing region ring"))?;
        let ring = parse_ring(ring_value)?;

        let mut cities = Vec::new();
        if let Some(features) = raw.pointer("/cities/features").and_then(Value::as_array) {
            for feature in features {
                let id = feature
                    .pointer("/properties/id")
                    .and_then(Value::as_i64)
                    .ok_or_else(|| DefenseError::malformed("city feature missing id"))?;
                let coords = feature
                    .pointer("/geometry/coordinates")
                    .and_then(Value::as_array)
                    .ok_or_else(|| DefenseError::malformed("city feature missing coordinates"))?;
                if coords.len() < 2 {
                    return Err(DefenseError::malformed("city coordinates need lon and lat"));
                }
                let lon = coords[0].as_f64().unwrap_or(0.0);
                let lat = coords[1].as_f64().unwrap_or(0.0);
                let alt = coords.get(2).and_then(Value::as_f64).unwrap_or(0.0);
                cities.push(CityPoint {
                    id,
                    position: GeoPoint::new(lon, lat, alt),
                });
            }
        }

        let mut arsenal = BTreeMap::new();
        if let Some(map) = raw.get("arsenal").and_then(Value::as_object) {
            for (name, count) in map {
                if name == "total" {
                    continue;
                }
                arsenal.insert(name.clone(), count.as_u64().unwrap_or(0) as u32);
            }
        }

        Ok(Self {
            team_id,
            region: Polygon::new(ring),
            cities,
            arsenal,
        })
    }
}

fn parse_ring(value: &Value) -> Result<Vec<[f64; 2]>, DefenseError> {
    let points = value
        .as_array()
        .ok_or_else(|| DefenseError::malformed("region ring is not an array"))?;
    let mut ring = Vec::with_capacity(points.len());
    for point in points {
        let pair = point
            .as_array()
            .ok_or_else(|| DefenseError::malformed("region vertex is not an array"))?;
        if pair.len() < 2 {
            return Err(DefenseError::malformed("region vertex needs lon and lat"));
        }
        ring.push([pair[0].as_f64().unwrap_or(0.0), pair[1].as_f64().unwrap_or(0.0)]);
    }
    Ok(ring)
}

/// The fire-solution payload dispatched to the attacker. Field names are
/// the wire contract; do not rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireOrder {
    pub team_id: i64,
    pub target_missile_id: i64,
    pub missile_type: String,
    pub firedfrom_lon: f64,
    pub firedfrom_lat: f64,
    pub fired_time: String,
    pub aim_lat: f64,
    pub aim_lon: f64,
    pub expected_hit_time: String,
    /// Meters, unlike every other length on this payload.
    pub target_alt: f64,
}

impl FireOrder {
    /// Render a committed solution onto the wire: times formatted,
    /// altitude converted back to meters.
    pub fn from_solution(team_id: i64, solution: &FireSolution) -> Self {
        Self {
            team_id,
            target_missile_id: solution.target_missile_id,
            missile_type: solution.interceptor.clone(),
            firedfrom_lon: solution.battery.lon,
            firedfrom_lat: solution.battery.lat,
            fired_time: format_order_time(solution.launch_time_secs),
            aim_lat: solution.impact_point.lat,
            aim_lon: solution.impact_point.lon,
            expected_hit_time: format_order_time(solution.impact_time_secs),
            target_alt: degrees_to_meters(solution.impact_point.alt),
        }
    }
}
