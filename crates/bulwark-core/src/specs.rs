//! Missile specification key: classification label -> speed and radius
//! categories.
//!
//! Categories are worthless without conversion to an outside scale; the
//! fixed tables in `constants` do that conversion. Both hostile missiles
//! and interceptors are looked up here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{meters_to_degrees, speed_category_meters, RADIUS_METERS_PER_CATEGORY};

/// One class of missile: a label plus 1-9 speed and radius categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissileSpec {
    pub label: String,
    pub speed_category: u8,
    pub radius_category: u8,
}

impl MissileSpec {
    pub fn new(label: &str, speed_category: u8, radius_category: u8) -> Self {
        Self {
            label: label.to_string(),
            speed_category,
            radius_category,
        }
    }
}

/// Lookup table from classification label to spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecKey {
    by_label: BTreeMap<String, MissileSpec>,
}

impl SpecKey {
    /// The standard spec key shared between attackers and defenders.
    pub fn standard() -> Self {
        Self::from_specs(vec![
            MissileSpec::new("Atlas", 1, 7),
            MissileSpec::new("Harpoon", 2, 8),
            MissileSpec::new("Hellfire", 3, 7),
            MissileSpec::new("Javelin", 4, 7),
            MissileSpec::new("Minuteman", 5, 9),
            MissileSpec::new("Patriot", 6, 6),
            MissileSpec::new("Peacekeeper", 7, 6),
            MissileSpec::new("SeaSparrow", 8, 5),
            MissileSpec::new("Titan", 8, 5),
            MissileSpec::new("Tomahawk", 9, 6),
            MissileSpec::new("Trident", 9, 9),
        ])
    }

    pub fn from_specs(specs: Vec<MissileSpec>) -> Self {
        let mut by_label = BTreeMap::new();
        for spec in specs {
            by_label.insert(spec.label.clone(), spec);
        }
        Self { by_label }
    }

    /// Add or replace a spec entry.
    pub fn insert(&mut self, spec: MissileSpec) {
        self.by_label.insert(spec.label.clone(), spec);
    }

    pub fn get(&self, label: &str) -> Option<&MissileSpec> {
        self.by_label.get(label)
    }

    /// Danger radius for a hostile missile label, in degrees.
    pub fn danger_radius_degrees(&self, label: &str) -> Option<f64> {
        self.get(label)
            .map(|s| meters_to_degrees(s.radius_category as f64 * RADIUS_METERS_PER_CATEGORY))
    }

    /// Flight speed for an interceptor label, in degrees per second.
    pub fn speed_degrees(&self, label: &str) -> Option<f64> {
        self.get(label)
            .map(|s| meters_to_degrees(speed_category_meters(s.speed_category)))
    }
}
