//! Pure geometric predicates over degree-based coordinates.
//!
//! The source of truth for every spatial decision the planner makes.
//! No storage engine involved — everything here is unit-testable math.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// A simple polygon as a closed ring of (lon, lat) vertices.
///
/// The ring may be given open (last vertex != first); `contains` treats
/// it as implicitly closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub ring: Vec<[f64; 2]>,
}

impl Polygon {
    pub fn new(ring: Vec<[f64; 2]>) -> Self {
        Self { ring }
    }

    pub fn is_empty(&self) -> bool {
        self.ring.len() < 3
    }

    /// Axis-aligned bounding box as (min_lon, min_lat, max_lon, max_lat).
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        if self.ring.is_empty() {
            return None;
        }
        let mut min_lon = f64::INFINITY;
        let mut min_lat = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        for &[lon, lat] in &self.ring {
            min_lon = min_lon.min(lon);
            min_lat = min_lat.min(lat);
            max_lon = max_lon.max(lon);
            max_lat = max_lat.max(lat);
        }
        Some((min_lon, min_lat, max_lon, max_lat))
    }

    /// Area-weighted centroid (shoelace). Falls back to the vertex mean
    /// for degenerate (zero-area) rings.
    pub fn centroid(&self) -> Option<GeoPoint> {
        if self.is_empty() {
            return None;
        }
        let n = self.ring.len();
        let mut area2 = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let [x0, y0] = self.ring[i];
            let [x1, y1] = self.ring[(i + 1) % n];
            let cross = x0 * y1 - x1 * y0;
            area2 += cross;
            cx += (x0 + x1) * cross;
            cy += (y0 + y1) * cross;
        }
        if area2.abs() < f64::EPSILON {
            let (mut mx, mut my) = (0.0, 0.0);
            for &[x, y] in &self.ring {
                mx += x;
                my += y;
            }
            return Some(GeoPoint::new(mx / n as f64, my / n as f64, 0.0));
        }
        let scale = 1.0 / (3.0 * area2);
        Some(GeoPoint::new(cx * scale, cy * scale, 0.0))
    }

    /// Ray-casting point-in-polygon test. Points exactly on an edge are
    /// not guaranteed either way.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        let n = self.ring.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let [xi, yi] = self.ring[i];
            let [xj, yj] = self.ring[j];
            if ((yi > lat) != (yj > lat))
                && (lon < (xj - xi) * (lat - yi) / (yj - yi) + xi)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Random point inside the polygon by rejection sampling over the
    /// bounding box. Falls back to the centroid if sampling keeps
    /// missing (thin slivers).
    pub fn random_point_in<R: Rng>(&self, rng: &mut R) -> Option<GeoPoint> {
        let (min_lon, min_lat, max_lon, max_lat) = self.bounding_box()?;
        for _ in 0..256 {
            let lon = rng.gen_range(min_lon..=max_lon);
            let lat = rng.gen_range(min_lat..=max_lat);
            if self.contains(lon, lat) {
                return Some(GeoPoint::new(lon, lat, 0.0));
            }
        }
        self.centroid()
    }
}

/// Whether `point` lies within `radius_deg` of `center` in the
/// horizontal plane. The buffer test behind threat classification:
/// protected points sit at altitude zero and their danger radius is a
/// horizontal disc.
pub fn within_buffer(point: &GeoPoint, center: &GeoPoint, radius_deg: f64) -> bool {
    point.horizontal_range_to(center) <= radius_deg
}

/// Index of the nearest point of a slice by 3D distance, first wins on
/// ties. Returns `None` on an empty slice.
pub fn nearest_index(from: &GeoPoint, candidates: &[GeoPoint]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in candidates.iter().enumerate() {
        let d = from.range3d_to(c);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}
