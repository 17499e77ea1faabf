//! Trajectory extrapolation — velocity from two samples, then a lazy
//! forward walk of predicted positions.

use bulwark_core::errors::DefenseError;
use bulwark_core::types::{GeoPoint, GeoVelocity};

use crate::track_store::Sample;

/// Per-axis velocity estimate between two chronologically ordered
/// samples of the same missile.
///
/// Identical (or reversed) timestamps leave the velocity undefined and
/// are rejected; the caller keeps the newest ping as the track's only
/// sample and retries on the next sweep.
pub fn velocity_between(
    missile_id: i64,
    previous: &Sample,
    current: &Sample,
) -> Result<GeoVelocity, DefenseError> {
    let dt = current.time_secs - previous.time_secs;
    if dt <= 0.0 {
        return Err(DefenseError::InvalidSampleInterval { missile_id });
    }
    Ok(GeoVelocity::new(
        (current.position.lon - previous.position.lon) / dt,
        (current.position.lat - previous.position.lat) / dt,
        (current.position.alt - previous.position.alt) / dt,
    ))
}

/// One step of a predicted trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedPoint {
    /// Seconds ahead of the last sample (1-based).
    pub step: u32,
    pub position: GeoPoint,
    /// Absolute time of this point: `now + step`.
    pub time_secs: f64,
}

/// A lazy, finite forward extrapolation: `origin + velocity * k` for
/// k = 1..=horizon, tagged with absolute times.
///
/// Copyable scratch state — each planning pass re-walks it; nothing is
/// materialized or retained between sweeps.
#[derive(Debug, Clone, Copy)]
pub struct Prediction {
    origin: GeoPoint,
    velocity: GeoVelocity,
    now_secs: f64,
    horizon: u32,
}

impl Prediction {
    pub fn new(origin: GeoPoint, velocity: GeoVelocity, now_secs: f64, horizon: u32) -> Self {
        Self {
            origin,
            velocity,
            now_secs,
            horizon,
        }
    }

    pub fn velocity(&self) -> GeoVelocity {
        self.velocity
    }

    pub fn iter(&self) -> PredictionIter {
        PredictionIter {
            prediction: *self,
            next_step: 1,
        }
    }

    /// Whether any predicted point is at or above ground level. A
    /// trajectory entirely below ground has already impacted.
    pub fn any_above_ground(&self) -> bool {
        self.iter().any(|p| p.position.alt >= 0.0)
    }
}

impl IntoIterator for Prediction {
    type Item = PredictedPoint;
    type IntoIter = PredictionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct PredictionIter {
    prediction: Prediction,
    next_step: u32,
}

impl Iterator for PredictionIter {
    type Item = PredictedPoint;

    fn next(&mut self) -> Option<PredictedPoint> {
        if self.next_step > self.prediction.horizon {
            return None;
        }
        let step = self.next_step;
        self.next_step += 1;
        let secs = step as f64;
        Some(PredictedPoint {
            step,
            position: self.prediction.origin.advanced_by(&self.prediction.velocity, secs),
            time_secs: self.prediction.now_secs + secs,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .prediction
            .horizon
            .saturating_sub(self.next_step - 1) as usize;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lon: f64, lat: f64, alt: f64, t: f64) -> Sample {
        Sample {
            position: GeoPoint::new(lon, lat, alt),
            time_secs: t,
        }
    }

    #[test]
    fn test_velocity_sign_and_magnitude() {
        let v = velocity_between(
            1,
            &sample(0.0, 0.0, 0.0, 0.0),
            &sample(2.0, 4.0, 0.0, 2.0),
        )
        .unwrap();
        assert_eq!(v, GeoVelocity::new(1.0, 2.0, 0.0));
        // Velocity applied for k seconds gives the per-step offset.
        let origin = GeoPoint::default();
        assert_eq!(origin.advanced_by(&v, 1.0), GeoPoint::new(1.0, 2.0, 0.0));
        assert_eq!(origin.advanced_by(&v, 5.0), GeoPoint::new(5.0, 10.0, 0.0));
    }

    #[test]
    fn test_prediction_walks_from_latest_sample() {
        let current = sample(2.0, 4.0, 0.0, 2.0);
        let v = velocity_between(1, &sample(0.0, 0.0, 0.0, 0.0), &current).unwrap();
        let now = 100.0;
        let prediction = Prediction::new(current.position, v, now, 10);
        let points: Vec<PredictedPoint> = prediction.iter().collect();
        assert_eq!(points.len(), 10);
        // k = 1: one velocity step past the newest sample, at now + 1.
        assert_eq!(points[0].position, GeoPoint::new(3.0, 6.0, 0.0));
        assert_eq!(points[0].time_secs, 101.0);
        assert_eq!(points[4].position, GeoPoint::new(7.0, 14.0, 0.0));
        assert_eq!(points[4].time_secs, 105.0);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = velocity_between(
            9,
            &sample(0.0, 0.0, 0.0, 5.0),
            &sample(1.0, 1.0, 0.0, 5.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DefenseError::InvalidSampleInterval { missile_id: 9 }
        ));
    }

    #[test]
    fn test_descending_velocity_goes_below_ground() {
        let current = sample(0.0, 0.0, 2.5, 1.0);
        let v = velocity_between(1, &sample(0.0, 0.0, 3.5, 0.0), &current).unwrap();
        let prediction = Prediction::new(current.position, v, 0.0, 5);
        // Altitudes: 1.5, 0.5, -0.5, -1.5, -2.5.
        let above: Vec<u32> = prediction
            .iter()
            .filter(|p| p.position.alt >= 0.0)
            .map(|p| p.step)
            .collect();
        assert_eq!(above, vec![1, 2]);
        assert!(prediction.any_above_ground());

        let sunk = Prediction::new(GeoPoint::new(0.0, 0.0, -10.0), v, 0.0, 5);
        assert!(!sunk.any_above_ground());
    }
}
