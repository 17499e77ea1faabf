//! Threat classification — does a predicted path endanger anything we
//! protect?

use bulwark_core::enums::PoiCategory;
use bulwark_core::geometry::within_buffer;
use bulwark_core::types::PointOfInterest;

use super::extrapolate::Prediction;

/// Whether the predicted trajectory counts as a threat.
///
/// A missile is a threat when some predicted point falls within the
/// danger radius of a protected Target — or unconditionally under the
/// altruist policy, which intercepts on behalf of regions that are not
/// ours. Non-threats are dropped without spending inventory; that is a
/// deliberate false-negative risk the doctrine accepts.
pub fn is_threat(
    prediction: Prediction,
    pois: &[PointOfInterest],
    danger_radius_deg: f64,
    altruist: bool,
) -> bool {
    if altruist {
        return true;
    }
    let targets: Vec<&PointOfInterest> = pois
        .iter()
        .filter(|p| p.category == PoiCategory::Target)
        .collect();
    if targets.is_empty() {
        return false;
    }
    prediction.iter().any(|point| {
        targets
            .iter()
            .any(|t| within_buffer(&point.position, &t.position, danger_radius_deg))
    })
}

#[cfg(test)]
mod tests {
    use bulwark_core::types::{GeoPoint, GeoVelocity};

    use super::*;

    fn poi(id: i64, category: PoiCategory, lon: f64, lat: f64) -> PointOfInterest {
        PointOfInterest {
            id,
            category,
            position: GeoPoint::new(lon, lat, 0.0),
        }
    }

    fn southbound() -> Prediction {
        // From (0, 50) heading toward the equator at 10 deg/s.
        Prediction::new(
            GeoPoint::new(0.0, 50.0, 0.0),
            GeoVelocity::new(0.0, -10.0, 0.0),
            0.0,
            100,
        )
    }

    #[test]
    fn test_altruist_overrides_filter() {
        // No targets at all, yet altruist still engages.
        assert!(is_threat(southbound(), &[], 10.0, true));
    }

    #[test]
    fn test_miss_is_not_a_threat() {
        let pois = vec![
            poi(1, PoiCategory::Target, 100.0, 0.0),
            poi(-1, PoiCategory::Battery, 0.0, 0.0),
        ];
        // The path runs down lon = 0, never within 10 degrees of
        // lon = 100. The battery nearby does not count.
        assert!(!is_threat(southbound(), &pois, 10.0, false));
    }

    #[test]
    fn test_pass_through_buffer_is_a_threat() {
        let pois = vec![poi(1, PoiCategory::Target, 0.0, 20.0)];
        assert!(is_threat(southbound(), &pois, 10.0, false));
    }

    #[test]
    fn test_radius_boundary_inclusive() {
        // Predicted points land on integer latitudes; target 5 degrees
        // off the path with radius exactly 5.
        let pois = vec![poi(1, PoiCategory::Target, 5.0, 20.0)];
        assert!(is_threat(southbound(), &pois, 5.0, false));
        assert!(!is_threat(southbound(), &pois, 4.999, false));
    }
}
