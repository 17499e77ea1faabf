//! Region setup — turn a register manifest into points of interest.
//!
//! One battery goes at the region centroid and a few more at random
//! points inside the polygon; every city becomes a protected Target.
//! Battery placement is the only randomness in the defender, so the
//! seed fully determines the layout.

use rand_chacha::ChaCha8Rng;

use bulwark_core::constants::RANDOM_BATTERY_COUNT;
use bulwark_core::enums::PoiCategory;
use bulwark_core::errors::DefenseError;
use bulwark_core::protocol::RegisterManifest;
use bulwark_core::types::PointOfInterest;

/// Build the defended layout for a freshly assigned region.
pub fn build_points_of_interest(
    manifest: &RegisterManifest,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<PointOfInterest>, DefenseError> {
    let centroid = manifest
        .region
        .centroid()
        .ok_or_else(|| DefenseError::malformed("assigned region polygon is degenerate"))?;

    let mut pois = Vec::with_capacity(1 + RANDOM_BATTERY_COUNT + manifest.cities.len());
    pois.push(PointOfInterest {
        id: -1,
        category: PoiCategory::Battery,
        position: centroid,
    });
    for i in 0..RANDOM_BATTERY_COUNT {
        let position = manifest
            .region
            .random_point_in(rng)
            .ok_or_else(|| DefenseError::malformed("assigned region polygon is degenerate"))?;
        pois.push(PointOfInterest {
            id: -2 - i as i64,
            category: PoiCategory::Battery,
            position,
        });
    }
    for city in &manifest.cities {
        pois.push(PointOfInterest {
            id: city.id,
            category: PoiCategory::Target,
            position: city.position,
        });
    }
    Ok(pois)
}
