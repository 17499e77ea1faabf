//! Demo scenario — a fixed region and a seeded raid schedule for the
//! scripted attacker.

use std::collections::BTreeMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bulwark_core::constants::{meters_to_degrees, speed_category_meters};
use bulwark_core::geometry::Polygon;
use bulwark_core::protocol::{CityPoint, RegisterManifest};
use bulwark_core::specs::SpecKey;
use bulwark_core::types::GeoPoint;

use crate::attacker::{RaidMissile, ScriptedAttacker};

/// A square region in the mid-latitudes with three protected cities and
/// a mixed arsenal.
pub fn demo_manifest() -> RegisterManifest {
    let mut arsenal = BTreeMap::new();
    arsenal.insert("Patriot".to_string(), 12);
    arsenal.insert("SeaSparrow".to_string(), 8);
    arsenal.insert("Tomahawk".to_string(), 6);

    RegisterManifest {
        team_id: 1,
        region: Polygon::new(vec![
            [28.0, 28.0],
            [36.0, 28.0],
            [36.0, 36.0],
            [28.0, 36.0],
            [28.0, 28.0],
        ]),
        cities: vec![
            CityPoint {
                id: 1,
                position: GeoPoint::new(30.0, 30.0, 0.0),
            },
            CityPoint {
                id: 2,
                position: GeoPoint::new(33.5, 31.0, 0.0),
            },
            CityPoint {
                id: 3,
                position: GeoPoint::new(31.0, 34.0, 0.0),
            },
        ],
        arsenal,
    }
}

/// Generate a raid: `count` hostile missiles aimed at the demo cities,
/// launched in a staggered stream from random bearings.
pub fn demo_raid(rng: &mut ChaCha8Rng, count: usize) -> Vec<RaidMissile> {
    let manifest = demo_manifest();
    let specs = SpecKey::standard();
    let archetypes = ["Tomahawk", "Harpoon", "Hellfire", "Trident"];

    let mut raid = Vec::with_capacity(count);
    for i in 0..count {
        let missile_type = archetypes[rng.gen_range(0..archetypes.len())];
        let city = &manifest.cities[rng.gen_range(0..manifest.cities.len())];

        // Spawn on a ring well outside the region and fly straight at
        // the city at the type's table speed.
        let bearing = rng.gen_range(0.0..std::f64::consts::TAU);
        let range_deg = rng.gen_range(5.0..9.0);
        let origin_lon = city.position.lon + range_deg * bearing.sin();
        let origin_lat = city.position.lat + range_deg * bearing.cos();

        let speed_deg = specs
            .speed_degrees(missile_type)
            .unwrap_or_else(|| meters_to_degrees(speed_category_meters(9)));
        let flight_secs = range_deg / speed_deg;

        let origin_alt_m = rng.gen_range(6_000.0..12_000.0);
        raid.push(RaidMissile {
            id: 100 + i as i64,
            missile_type: missile_type.to_string(),
            launch_secs: (i as f64) * 3.0,
            origin_lon,
            origin_lat,
            origin_alt_m,
            vel_lon: -speed_deg * bearing.sin(),
            vel_lat: -speed_deg * bearing.cos(),
            // Descend so the missile reaches ground level on arrival.
            climb_m_s: -origin_alt_m / flight_secs,
        });
    }
    raid
}

/// A ready-to-run scripted attacker for the demo binary and tests.
pub fn demo_attacker(rng: &mut ChaCha8Rng, raid_size: usize) -> ScriptedAttacker {
    let raid = demo_raid(rng, raid_size);
    ScriptedAttacker::new("scripted-demo", demo_manifest(), raid)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_demo_raid_is_seeded() {
        let a = demo_raid(&mut ChaCha8Rng::seed_from_u64(3), 6);
        let b = demo_raid(&mut ChaCha8Rng::seed_from_u64(3), 6);
        assert_eq!(a.len(), 6);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.origin_lon, y.origin_lon);
            assert_eq!(x.vel_lat, y.vel_lat);
        }
    }

    #[test]
    fn test_demo_raid_descends_toward_cities() {
        let raid = demo_raid(&mut ChaCha8Rng::seed_from_u64(3), 8);
        for m in &raid {
            assert!(m.climb_m_s < 0.0);
            assert!(m.origin_alt_m > 0.0);
            // Horizontal speed matches a spec table entry.
            let speed = (m.vel_lon * m.vel_lon + m.vel_lat * m.vel_lat).sqrt();
            assert!(speed > meters_to_degrees(20_000.0));
        }
    }
}
