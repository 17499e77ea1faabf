//! Defense engine — the outer control loop.
//!
//! Owns the track store, inventory ledger, and points of interest; runs
//! the ping -> track -> extrapolate -> classify -> plan -> dispatch
//! pipeline once per attacker per tick. Collaborator failures are
//! logged and make the tick a no-op; only inventory depletion changes
//! the loop's state.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use bulwark_core::config::DefenseConfig;
use bulwark_core::enums::EnginePhase;
use bulwark_core::errors::DefenseError;
use bulwark_core::events::DefenseEvent;
use bulwark_core::protocol::{FireOrder, Observation};
use bulwark_core::specs::SpecKey;
use bulwark_core::state::{DefenseSnapshot, ScoreView, TrackView};
use bulwark_core::types::{PointOfInterest, SimTime};

use crate::attacker::AttackerLink;
use crate::inventory::InventoryLedger;
use crate::region;
use crate::systems::classify;
use crate::systems::extrapolate::{velocity_between, Prediction};
use crate::systems::plan::{plan_interception, PlanOutcome, ShotDoctrine};
use crate::track_store::{PingOutcome, Sample, TrackStore};

/// The defender's control loop and all state it mutates.
pub struct DefenseEngine {
    config: DefenseConfig,
    specs: SpecKey,
    phase: EnginePhase,
    time: SimTime,
    attackers: Vec<Box<dyn AttackerLink>>,
    team_id: i64,
    pois: Vec<PointOfInterest>,
    tracks: TrackStore,
    ledger: InventoryLedger,
    rng: ChaCha8Rng,
    events: Vec<DefenseEvent>,
    score: ScoreView,
}

impl DefenseEngine {
    /// Create an idle engine. `initialize` must run before `start`.
    pub fn new(
        config: DefenseConfig,
        attackers: Vec<Box<dyn AttackerLink>>,
    ) -> Result<Self, DefenseError> {
        config.validate()?;
        let mut specs = SpecKey::standard();
        for spec in &config.extra_specs {
            specs.insert(spec.clone());
        }
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            specs,
            phase: EnginePhase::Idle,
            time: SimTime::default(),
            attackers,
            team_id: 0,
            pois: Vec::new(),
            tracks: TrackStore::new(),
            ledger: InventoryLedger::new(),
            rng,
            events: Vec::new(),
            score: ScoreView::default(),
        })
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> ScoreView {
        self.score
    }

    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    pub fn tracks(&self) -> &TrackStore {
        &self.tracks
    }

    pub fn pois(&self) -> &[PointOfInterest] {
        &self.pois
    }

    /// Register with the first attacker and set up region, targets, and
    /// arsenal. Legal from any phase except `Running`; re-running it
    /// resets the round.
    pub fn initialize(&mut self) -> Result<(), DefenseError> {
        if self.phase == EnginePhase::Running {
            return Err(DefenseError::InvalidConfig {
                detail: "cannot re-initialize while running".to_string(),
            });
        }
        let first = self
            .attackers
            .first_mut()
            .ok_or_else(|| DefenseError::unavailable("attacker", "no attacker links configured"))?;
        let manifest = first.register()?;

        self.team_id = manifest.team_id;
        self.pois = region::build_points_of_interest(&manifest, &mut self.rng)?;
        self.ledger = InventoryLedger::from_arsenal(manifest.arsenal.clone());
        self.tracks.reset();
        self.time = SimTime::default();
        self.score = ScoreView::default();
        self.events.clear();
        self.phase = EnginePhase::Initialized;
        info!(
            team_id = self.team_id,
            pois = self.pois.len(),
            interceptors = self.ledger.total_remaining(),
            "simulation initialized"
        );
        Ok(())
    }

    /// Notify every attacker of simulation start and begin ticking.
    pub fn start(&mut self) {
        if self.phase != EnginePhase::Initialized {
            return;
        }
        for link in &mut self.attackers {
            if let Err(e) = link.notify_start(self.team_id) {
                warn!(attacker = link.label(), error = %e, "start notification failed");
            }
        }
        self.phase = EnginePhase::Running;
        info!("beginning simulation session");
    }

    /// The blocking control loop: tick at the configured cadence until
    /// the arsenal is depleted. Returns the coarse outcome string.
    pub fn run(&mut self) -> String {
        if self.phase == EnginePhase::Initialized {
            self.start();
        }
        if self.phase != EnginePhase::Running {
            return "Simulation is not initialized.".to_string();
        }
        while self.phase == EnginePhase::Running {
            let now = self.current_clock();
            self.tick_at(now);
            if self.phase == EnginePhase::Running {
                std::thread::sleep(Duration::from_secs_f64(self.config.tick_interval_secs));
            }
        }
        "Finished simulation.".to_string()
    }

    /// Clock for the next tick: the first attacker's simulation clock,
    /// falling back to the wall clock when unreachable.
    pub fn current_clock(&mut self) -> f64 {
        match self.attackers.first_mut().map(|a| a.clock()) {
            Some(Ok(secs)) => secs,
            Some(Err(e)) => {
                warn!(error = %e, "clock request failed, using wall clock");
                wall_clock_secs()
            }
            None => wall_clock_secs(),
        }
    }

    /// Run one tick against the given clock value and return the
    /// resulting snapshot. No-op unless `Running`.
    pub fn tick_at(&mut self, now_secs: f64) -> DefenseSnapshot {
        if self.phase != EnginePhase::Running {
            return self.snapshot();
        }

        for index in 0..self.attackers.len() {
            let sweep = match self.attackers[index].radar_sweep() {
                Ok(sweep) => sweep,
                Err(e) => {
                    warn!(
                        attacker = self.attackers[index].label(),
                        error = %e,
                        "radar sweep failed"
                    );
                    continue;
                }
            };
            self.score.sweeps_processed += 1;
            if sweep.is_empty() {
                continue;
            }
            for feature in &sweep.features {
                match feature.observation() {
                    Ok(obs) => self.process_observation(index, &obs, now_secs),
                    Err(e) => {
                        warn!(error = %e, "skipping malformed sweep item");
                        self.score.malformed_skipped += 1;
                    }
                }
            }
        }

        if self.ledger.is_depleted() {
            self.events.push(DefenseEvent::ArsenalDepleted);
            self.finish();
        }
        self.time.advance(now_secs);
        self.snapshot()
    }

    /// One observation through the full decision pipeline.
    fn process_observation(&mut self, attacker_index: usize, obs: &Observation, now_secs: f64) {
        self.score.pings_processed += 1;
        let missile_id = obs.missile_id;

        let previous = match self.tracks.ingest(obs) {
            PingOutcome::Initiated => {
                debug!(missile_id, "new hostile track initiated");
                self.events.push(DefenseEvent::TrackInitiated { missile_id });
                self.score.tracks_initiated += 1;
                return;
            }
            PingOutcome::AlreadySolved => {
                debug!(missile_id, "ping for solved missile ignored");
                return;
            }
            PingOutcome::Advanced { previous } => previous,
        };

        let current = Sample {
            position: obs.position,
            time_secs: obs.time_secs,
        };
        let velocity = match velocity_between(missile_id, &previous, &current) {
            Ok(v) => v,
            Err(e) => {
                // The newest ping is already retained as the only
                // sample; extrapolation waits for the next one.
                warn!(missile_id, error = %e, "sample interval rejected");
                self.events
                    .push(DefenseEvent::SampleIntervalRejected { missile_id });
                return;
            }
        };
        let prediction = Prediction::new(
            current.position,
            velocity,
            now_secs,
            self.config.prediction_horizon,
        );

        // Under the altruist policy everything is a threat and the
        // danger radius never matters, unknown labels included.
        let is_threat = self.config.altruist || {
            match self.specs.danger_radius_degrees(&obs.missile_type) {
                Some(radius) => classify::is_threat(prediction, &self.pois, radius, false),
                None => {
                    warn!(
                        missile_id,
                        missile_type = %obs.missile_type,
                        "unknown missile type, cannot classify"
                    );
                    self.score.malformed_skipped += 1;
                    return;
                }
            }
        };

        if !is_threat {
            info!(missile_id, "ignoring low threat hostile missile");
            self.tracks.mark_solved(missile_id);
            self.events.push(DefenseEvent::ThreatIgnored { missile_id });
            self.score.threats_ignored += 1;
            return;
        }

        let doctrine = ShotDoctrine {
            shoot_earliest: self.config.shoot_earliest,
            safety_margin_secs: self.config.safety_margin_secs,
        };
        match plan_interception(
            prediction,
            now_secs,
            missile_id,
            &self.pois,
            &mut self.ledger,
            &self.specs,
            doctrine,
        ) {
            Ok(PlanOutcome::Solution(solution)) => {
                let order = FireOrder::from_solution(self.team_id, &solution);
                // Inventory is committed at this point; a failed
                // notification is a collaborator problem, not a reason
                // to unwind the launch.
                if let Err(e) = self.attackers[attacker_index].dispatch(&order) {
                    warn!(
                        missile_id,
                        attacker = self.attackers[attacker_index].label(),
                        error = %e,
                        "fire solution dispatch failed"
                    );
                }
                info!(
                    missile_id,
                    interceptor = %solution.interceptor,
                    impact_time = solution.impact_time_secs,
                    "interceptor committed"
                );
                self.tracks.mark_solved(missile_id);
                self.events.push(DefenseEvent::BirdAway {
                    missile_id,
                    interceptor: solution.interceptor,
                });
                self.score.interceptors_fired += 1;
            }
            Ok(PlanOutcome::NoSolution) => {
                debug!(missile_id, "no reachable intercept yet, deferring");
                self.events
                    .push(DefenseEvent::SolutionDeferred { missile_id });
                self.score.solutions_deferred += 1;
            }
            Ok(PlanOutcome::AlreadyImpacted) => {
                debug!(missile_id, "trajectory entirely below ground");
                self.tracks.mark_solved(missile_id);
                self.events
                    .push(DefenseEvent::AlreadyImpacted { missile_id });
            }
            Err(e) => {
                // NoInterceptorBattery and friends: report, retry on
                // the next ping.
                warn!(missile_id, error = %e, "interception planning failed");
            }
        }
    }

    /// Notify attackers of simulation end and stop the loop.
    fn finish(&mut self) {
        info!("interceptor arsenal depleted, finishing simulation session");
        for link in &mut self.attackers {
            if let Err(e) = link.notify_quit(self.team_id) {
                warn!(attacker = link.label(), error = %e, "quit notification failed");
            }
        }
        self.phase = EnginePhase::Finished;
    }

    /// Build the externally visible state, draining pending events.
    pub fn snapshot(&mut self) -> DefenseSnapshot {
        let tracks = self
            .tracks
            .iter_sorted()
            .map(|t| TrackView {
                missile_id: t.id,
                missile_type: t.missile_type.clone(),
                status: t.status,
                position: t.last_sample.position,
                observed_at: t.last_sample.time_secs,
            })
            .collect();
        DefenseSnapshot {
            phase: self.phase,
            time: self.time,
            tracks,
            inventory: self.ledger.views(),
            pois: self.pois.clone(),
            score: self.score,
            events: std::mem::take(&mut self.events),
        }
    }
}

fn wall_clock_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1_000.0
}
