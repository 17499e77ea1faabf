//! The transport boundary toward attacker collaborators.
//!
//! Every network interaction of the control loop goes through the
//! `AttackerLink` trait: registration, clock requests, radar sweeps,
//! start/quit notification, and fire-solution dispatch. Link
//! implementations own their transport concerns (timeouts included);
//! the engine only sees `DefenseError`.

use std::cell::RefCell;
use std::rc::Rc;

use bulwark_core::errors::DefenseError;
use bulwark_core::protocol::{
    FireOrder, RadarSweep, RegisterManifest, SweepFeature, SweepGeometry, SweepProperties,
};
use bulwark_core::timefmt::secs_to_clock;
use bulwark_core::types::GeoPoint;

/// One attacker collaborator endpoint.
pub trait AttackerLink {
    /// Human-readable label for logs.
    fn label(&self) -> &str;

    /// Fetch team identity, region, cities, and arsenal.
    fn register(&mut self) -> Result<RegisterManifest, DefenseError>;

    /// Current simulation clock in seconds.
    fn clock(&mut self) -> Result<f64, DefenseError>;

    /// One batch of missile observations for this tick.
    fn radar_sweep(&mut self) -> Result<RadarSweep, DefenseError>;

    fn notify_start(&mut self, team_id: i64) -> Result<(), DefenseError>;

    fn notify_quit(&mut self, team_id: i64) -> Result<(), DefenseError>;

    /// Send a committed fire solution.
    fn dispatch(&mut self, order: &FireOrder) -> Result<(), DefenseError>;
}

/// Shared handle onto the orders a scripted attacker has received.
pub type OrderLog = Rc<RefCell<Vec<FireOrder>>>;

/// One hostile missile in a scripted raid.
#[derive(Debug, Clone)]
pub struct RaidMissile {
    pub id: i64,
    pub missile_type: String,
    /// Simulation second the missile first appears on radar.
    pub launch_secs: f64,
    /// Launch point; horizontal in degrees.
    pub origin_lon: f64,
    pub origin_lat: f64,
    /// Launch altitude in meters (the wire unit for altitude).
    pub origin_alt_m: f64,
    /// Horizontal velocity in degrees per second.
    pub vel_lon: f64,
    pub vel_lat: f64,
    /// Climb rate in meters per second (negative = descending).
    pub climb_m_s: f64,
}

impl RaidMissile {
    fn position_at(&self, t: f64) -> GeoPoint {
        let flight = t - self.launch_secs;
        GeoPoint::new(
            self.origin_lon + self.vel_lon * flight,
            self.origin_lat + self.vel_lat * flight,
            self.origin_alt_m + self.climb_m_s * flight,
        )
    }
}

/// A deterministic in-process attacker: replays a fixed raid schedule
/// against its own clock and records every fire order it receives.
///
/// Drives tests and the demo binary; the radar payloads it produces go
/// through the same wire shapes a remote attacker would send.
pub struct ScriptedAttacker {
    label: String,
    manifest: RegisterManifest,
    raid: Vec<RaidMissile>,
    /// Ids struck from the raid after a fire solution arrived.
    engaged: Vec<i64>,
    clock_secs: f64,
    step_secs: f64,
    started: bool,
    orders: OrderLog,
}

impl ScriptedAttacker {
    pub fn new(label: &str, manifest: RegisterManifest, raid: Vec<RaidMissile>) -> Self {
        Self {
            label: label.to_string(),
            manifest,
            raid,
            engaged: Vec::new(),
            clock_secs: 0.0,
            step_secs: 1.0,
            started: false,
            orders: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Clock advance per radar sweep (defaults to one second).
    pub fn with_step(mut self, step_secs: f64) -> Self {
        self.step_secs = step_secs;
        self
    }

    pub fn with_start_clock(mut self, clock_secs: f64) -> Self {
        self.clock_secs = clock_secs;
        self
    }

    /// Handle to the received fire orders, for assertions.
    pub fn order_log(&self) -> OrderLog {
        Rc::clone(&self.orders)
    }

    pub fn started(&self) -> bool {
        self.started
    }

    fn visible_at(&self, t: f64) -> impl Iterator<Item = (&RaidMissile, GeoPoint)> {
        self.raid.iter().filter_map(move |m| {
            if t < m.launch_secs || self.engaged.contains(&m.id) {
                return None;
            }
            let position = m.position_at(t);
            // Below-ground missiles have impacted and drop off radar.
            (position.alt >= 0.0).then_some((m, position))
        })
    }
}

impl AttackerLink for ScriptedAttacker {
    fn label(&self) -> &str {
        &self.label
    }

    fn register(&mut self) -> Result<RegisterManifest, DefenseError> {
        Ok(self.manifest.clone())
    }

    fn clock(&mut self) -> Result<f64, DefenseError> {
        Ok(self.clock_secs)
    }

    fn radar_sweep(&mut self) -> Result<RadarSweep, DefenseError> {
        let t = self.clock_secs;
        let features = self
            .visible_at(t)
            .map(|(m, position)| SweepFeature {
                id: Some(m.id),
                geometry: Some(SweepGeometry {
                    coordinates: vec![position.lon, position.lat],
                }),
                properties: Some(SweepProperties {
                    altitude: Some(position.alt),
                    current_time: Some(secs_to_clock(t)),
                    missile_type: Some(m.missile_type.clone()),
                }),
            })
            .collect();
        self.clock_secs += self.step_secs;
        Ok(RadarSweep { features })
    }

    fn notify_start(&mut self, _team_id: i64) -> Result<(), DefenseError> {
        self.started = true;
        Ok(())
    }

    fn notify_quit(&mut self, _team_id: i64) -> Result<(), DefenseError> {
        self.started = false;
        Ok(())
    }

    fn dispatch(&mut self, order: &FireOrder) -> Result<(), DefenseError> {
        self.engaged.push(order.target_missile_id);
        self.orders.borrow_mut().push(order.clone());
        Ok(())
    }
}
