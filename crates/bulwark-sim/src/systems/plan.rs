//! Interception planning — search for a feasible fire solution.
//!
//! Interceptor types are tried in ledger priority order (deepest stock
//! first); within a type, every above-ground predicted point is tested
//! for reachability from its nearest battery. The first type with a
//! reachable point wins and its stock is committed before the solution
//! is returned.

use tracing::warn;

use bulwark_core::enums::PoiCategory;
use bulwark_core::errors::DefenseError;
use bulwark_core::specs::SpecKey;
use bulwark_core::types::{FireSolution, GeoPoint, PointOfInterest};

use super::extrapolate::Prediction;
use crate::inventory::InventoryLedger;

/// Shot-timing doctrine for the planner.
#[derive(Debug, Clone, Copy)]
pub struct ShotDoctrine {
    /// Earliest reachable intercept wins; otherwise the latest one
    /// (closest to impact) is preferred for maximum decision time.
    pub shoot_earliest: bool,
    /// Buffer seconds subtracted from the launch window when not
    /// shooting earliest.
    pub safety_margin_secs: f64,
}

impl ShotDoctrine {
    fn shoot_buffer(&self) -> f64 {
        if self.shoot_earliest {
            0.0
        } else {
            self.safety_margin_secs
        }
    }
}

/// Outcome of one planning pass over a threatening trajectory.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Inventory committed; dispatch this.
    Solution(FireSolution),
    /// Nothing reachable with current stock; the track stays active and
    /// is re-evaluated on the next ping.
    NoSolution,
    /// Every predicted point is below ground; nothing left to shoot at.
    AlreadyImpacted,
}

/// Plan an interception for one threatening missile.
///
/// On success the chosen type's stock has already been decremented
/// (checked-then-committed against the ledger); the caller only
/// dispatches and marks the track solved.
pub fn plan_interception(
    prediction: Prediction,
    now_secs: f64,
    target_missile_id: i64,
    pois: &[PointOfInterest],
    ledger: &mut InventoryLedger,
    specs: &SpecKey,
    doctrine: ShotDoctrine,
) -> Result<PlanOutcome, DefenseError> {
    let batteries: Vec<GeoPoint> = pois
        .iter()
        .filter(|p| p.category == PoiCategory::Battery)
        .map(|p| p.position)
        .collect();
    if batteries.is_empty() {
        return Err(DefenseError::NoInterceptorBattery);
    }
    if !prediction.any_above_ground() {
        return Ok(PlanOutcome::AlreadyImpacted);
    }

    let shoot_buffer = doctrine.shoot_buffer();

    for (interceptor, _count) in ledger.types_by_priority() {
        let speed = match specs.speed_degrees(&interceptor) {
            Some(speed) if speed > 0.0 => speed,
            _ => {
                warn!(interceptor = %interceptor, "interceptor type missing from spec key, skipping");
                continue;
            }
        };

        let mut chosen: Option<(u32, f64, GeoPoint, f64, GeoPoint)> = None;
        for point in prediction.iter() {
            if point.position.alt < 0.0 {
                continue;
            }
            let battery = nearest_battery(&batteries, &point.position);
            let lead_secs = battery.range3d_to(&point.position) / speed;
            if point.time_secs - now_secs - shoot_buffer < lead_secs {
                continue;
            }
            chosen = Some((
                point.step,
                point.time_secs,
                point.position,
                lead_secs,
                battery,
            ));
            // Earliest doctrine takes the first reachable point; the
            // latest doctrine keeps scanning and retains the last one.
            if doctrine.shoot_earliest {
                break;
            }
        }

        if let Some((_step, impact_time, impact_point, lead_secs, battery)) = chosen {
            // Re-check immediately before commit; a freshly depleted
            // type falls through to the next in priority order.
            if !ledger.try_expend(&interceptor) {
                continue;
            }
            return Ok(PlanOutcome::Solution(FireSolution {
                target_missile_id,
                interceptor,
                battery,
                launch_time_secs: impact_time - lead_secs,
                impact_point,
                impact_time_secs: impact_time,
            }));
        }
    }

    Ok(PlanOutcome::NoSolution)
}

/// Nearest battery by 3D distance; first wins on ties.
fn nearest_battery(batteries: &[GeoPoint], point: &GeoPoint) -> GeoPoint {
    let index =
        bulwark_core::geometry::nearest_index(point, batteries).expect("batteries checked non-empty");
    batteries[index]
}

#[cfg(test)]
mod tests {
    use bulwark_core::specs::SpecKey;
    use bulwark_core::types::{GeoPoint, GeoVelocity};

    use super::*;

    fn battery_at(lon: f64, lat: f64) -> PointOfInterest {
        PointOfInterest {
            id: -1,
            category: PoiCategory::Battery,
            position: GeoPoint::new(lon, lat, 0.0),
        }
    }

    fn doctrine(shoot_earliest: bool) -> ShotDoctrine {
        ShotDoctrine {
            shoot_earliest,
            safety_margin_secs: 0.0,
        }
    }

    /// Inbound along the lon axis toward a battery at the origin:
    /// predicted points at lon 0.9 - 0.09k, horizon 7.
    fn inbound() -> Prediction {
        Prediction::new(
            GeoPoint::new(0.9, 0.0, 0.0),
            GeoVelocity::new(-0.09, 0.0, 0.0),
            0.0,
            7,
        )
    }

    #[test]
    fn test_tie_break_earliest_vs_latest() {
        // Atlas flies at 24975 m -> ~0.2247 deg/s; the reachable set of
        // inbound() is exactly k = 3..=7.
        let specs = SpecKey::standard();
        let pois = vec![battery_at(0.0, 0.0)];

        let mut ledger = InventoryLedger::from_arsenal([("Atlas".to_string(), 5)]);
        let early = plan_interception(inbound(), 0.0, 1, &pois, &mut ledger, &specs, doctrine(true))
            .unwrap();
        match early {
            PlanOutcome::Solution(s) => {
                assert_eq!(s.impact_time_secs, 3.0);
                assert!((s.impact_point.lon - (0.9 - 0.27)).abs() < 1e-12);
            }
            other => panic!("expected solution, got {other:?}"),
        }

        let mut ledger = InventoryLedger::from_arsenal([("Atlas".to_string(), 5)]);
        let late = plan_interception(inbound(), 0.0, 1, &pois, &mut ledger, &specs, doctrine(false))
            .unwrap();
        match late {
            PlanOutcome::Solution(s) => assert_eq!(s.impact_time_secs, 7.0),
            other => panic!("expected solution, got {other:?}"),
        }
    }

    #[test]
    fn test_launch_time_never_beats_now() {
        let specs = SpecKey::standard();
        let pois = vec![battery_at(0.0, 0.0)];
        let mut ledger = InventoryLedger::from_arsenal([("Atlas".to_string(), 1)]);
        let outcome =
            plan_interception(inbound(), 0.0, 1, &pois, &mut ledger, &specs, doctrine(true))
                .unwrap();
        if let PlanOutcome::Solution(s) = outcome {
            assert!(s.launch_time_secs >= 0.0);
            assert!(s.impact_time_secs >= s.launch_time_secs);
        } else {
            panic!("expected solution");
        }
    }

    #[test]
    fn test_safety_margin_shrinks_window() {
        let specs = SpecKey::standard();
        let pois = vec![battery_at(0.0, 0.0)];
        // With a 4-second buffer and a 7-second horizon, reachability
        // needs t_k - 4 >= lead; k = 7 still works (lead ~1.2s) but the
        // earliest reachable point moves later than k = 3.
        let mut ledger = InventoryLedger::from_arsenal([("Atlas".to_string(), 1)]);
        let outcome = plan_interception(
            inbound(),
            0.0,
            1,
            &pois,
            &mut ledger,
            &specs,
            ShotDoctrine {
                shoot_earliest: false,
                safety_margin_secs: 4.0,
            },
        )
        .unwrap();
        match outcome {
            PlanOutcome::Solution(s) => assert_eq!(s.impact_time_secs, 7.0),
            other => panic!("expected solution, got {other:?}"),
        }
    }

    #[test]
    fn test_priority_failover_on_depleted_type() {
        let specs = SpecKey::standard();
        let pois = vec![battery_at(0.0, 0.0)];
        // "Phantom" has deep stock priority but no spec entry; it must
        // be skipped, not wedge planning. Patriot is flat out.
        let mut ledger = InventoryLedger::from_arsenal([
            ("Phantom".to_string(), 9),
            ("Patriot".to_string(), 0),
            ("Atlas".to_string(), 2),
        ]);
        let outcome =
            plan_interception(inbound(), 0.0, 1, &pois, &mut ledger, &specs, doctrine(true))
                .unwrap();
        match outcome {
            PlanOutcome::Solution(s) => {
                assert_eq!(s.interceptor, "Atlas");
                assert_eq!(ledger.remaining("Atlas"), 1);
                assert_eq!(ledger.remaining("Phantom"), 9);
            }
            other => panic!("expected solution, got {other:?}"),
        }
    }

    #[test]
    fn test_unreachable_stays_active() {
        let specs = SpecKey::standard();
        // Battery far away: nothing reachable inside the horizon.
        let pois = vec![battery_at(500.0, 0.0)];
        let mut ledger = InventoryLedger::from_arsenal([("Atlas".to_string(), 3)]);
        let outcome =
            plan_interception(inbound(), 0.0, 1, &pois, &mut ledger, &specs, doctrine(true))
                .unwrap();
        assert_eq!(outcome, PlanOutcome::NoSolution);
        // Nothing was spent on a failed plan.
        assert_eq!(ledger.remaining("Atlas"), 3);
    }

    #[test]
    fn test_no_battery_is_an_error() {
        let specs = SpecKey::standard();
        let mut ledger = InventoryLedger::from_arsenal([("Atlas".to_string(), 3)]);
        let err = plan_interception(inbound(), 0.0, 1, &[], &mut ledger, &specs, doctrine(true))
            .unwrap_err();
        assert!(matches!(err, DefenseError::NoInterceptorBattery));
    }

    #[test]
    fn test_submerged_trajectory_already_impacted() {
        let specs = SpecKey::standard();
        let pois = vec![battery_at(0.0, 0.0)];
        let mut ledger = InventoryLedger::from_arsenal([("Atlas".to_string(), 3)]);
        let sunk = Prediction::new(
            GeoPoint::new(0.5, 0.0, -0.1),
            GeoVelocity::new(0.0, 0.0, -0.01),
            0.0,
            10,
        );
        let outcome =
            plan_interception(sunk, 0.0, 1, &pois, &mut ledger, &specs, doctrine(true)).unwrap();
        assert_eq!(outcome, PlanOutcome::AlreadyImpacted);
        assert_eq!(ledger.remaining("Atlas"), 3);
    }
}
