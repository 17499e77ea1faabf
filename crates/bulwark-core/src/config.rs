//! Engine configuration.
//!
//! One explicit object passed to the control loop and planner: strategy
//! flags, horizons, and RNG seed. Constructed at startup (optionally
//! from a JSON file), immutable during a tick, replaceable only between
//! simulation runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PREDICTION_HORIZON, DEFAULT_SAFETY_MARGIN_SECS, DEFAULT_TICK_INTERVAL_SECS,
};
use crate::errors::DefenseError;
use crate::specs::MissileSpec;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseConfig {
    /// Intercept missiles even when they threaten no protected point of
    /// ours.
    #[serde(default)]
    pub altruist: bool,
    /// Shoot at the earliest reachable intercept instead of the latest.
    #[serde(default)]
    pub shoot_earliest: bool,
    /// Buffer seconds subtracted from the launch window when not
    /// shooting earliest.
    #[serde(default = "default_safety_margin")]
    pub safety_margin_secs: f64,
    /// How many seconds of trajectory to predict in advance.
    #[serde(default = "default_prediction_horizon")]
    pub prediction_horizon: u32,
    /// RNG seed for battery placement. Same seed = same layout.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Control loop cadence in seconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: f64,
    /// Extra or overriding missile spec entries merged over the
    /// standard table.
    #[serde(default)]
    pub extra_specs: Vec<MissileSpec>,
}

fn default_safety_margin() -> f64 {
    DEFAULT_SAFETY_MARGIN_SECS
}

fn default_prediction_horizon() -> u32 {
    DEFAULT_PREDICTION_HORIZON
}

fn default_seed() -> u64 {
    42
}

fn default_tick_interval() -> f64 {
    DEFAULT_TICK_INTERVAL_SECS
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            altruist: false,
            shoot_earliest: false,
            safety_margin_secs: default_safety_margin(),
            prediction_horizon: default_prediction_horizon(),
            seed: default_seed(),
            tick_interval_secs: default_tick_interval(),
            extra_specs: Vec::new(),
        }
    }
}

impl DefenseConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DefenseError> {
        let raw = std::fs::read_to_string(path).map_err(|e| DefenseError::InvalidConfig {
            detail: format!("{}: {e}", path.display()),
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|e| DefenseError::InvalidConfig {
                detail: format!("{}: {e}", path.display()),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DefenseError> {
        if self.prediction_horizon == 0 {
            return Err(DefenseError::InvalidConfig {
                detail: "prediction_horizon must be at least 1".to_string(),
            });
        }
        if self.safety_margin_secs < 0.0 {
            return Err(DefenseError::InvalidConfig {
                detail: "safety_margin_secs must not be negative".to_string(),
            });
        }
        if self.tick_interval_secs <= 0.0 {
            return Err(DefenseError::InvalidConfig {
                detail: "tick_interval_secs must be positive".to_string(),
            });
        }
        Ok(())
    }
}
