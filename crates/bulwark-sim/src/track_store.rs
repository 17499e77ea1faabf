//! Track store — the evolving state of every observed hostile missile.
//!
//! One record per missile id, holding only the most recent sample; the
//! previous sample is handed back exactly once, to feed one velocity
//! estimate. Status transitions are monotonic and a solved track is
//! never reactivated.

use std::collections::HashMap;

use bulwark_core::enums::TrackStatus;
use bulwark_core::protocol::Observation;
use bulwark_core::types::GeoPoint;

/// One radar sample: where and when.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: GeoPoint,
    pub time_secs: f64,
}

/// The evolving state of a single observed missile.
#[derive(Debug, Clone)]
pub struct MissileTrack {
    pub id: i64,
    pub missile_type: String,
    pub status: TrackStatus,
    pub last_sample: Sample,
}

impl MissileTrack {
    fn from_observation(obs: &Observation) -> Self {
        Self {
            id: obs.missile_id,
            missile_type: obs.missile_type.clone(),
            status: TrackStatus::New,
            last_sample: Sample {
                position: obs.position,
                time_secs: obs.time_secs,
            },
        }
    }
}

/// What a ping did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum PingOutcome {
    /// First ping for this id; the track is now active with one sample.
    Initiated,
    /// The track already had a sample; it has been replaced and the
    /// previous one is returned for velocity estimation.
    Advanced { previous: Sample },
    /// The missile was already solved; the ping is logged and ignored.
    AlreadySolved,
}

/// All missile tracks, keyed by attacker-supplied id.
#[derive(Debug, Default)]
pub struct TrackStore {
    tracks: HashMap<i64, MissileTrack>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation into the store.
    pub fn ingest(&mut self, obs: &Observation) -> PingOutcome {
        match self.tracks.get_mut(&obs.missile_id) {
            None => {
                let mut track = MissileTrack::from_observation(obs);
                track.status = TrackStatus::Active;
                self.tracks.insert(obs.missile_id, track);
                PingOutcome::Initiated
            }
            Some(track) if track.status == TrackStatus::Solved => PingOutcome::AlreadySolved,
            Some(track) => {
                let previous = track.last_sample;
                track.last_sample = Sample {
                    position: obs.position,
                    time_secs: obs.time_secs,
                };
                track.missile_type = obs.missile_type.clone();
                PingOutcome::Advanced { previous }
            }
        }
    }

    /// Mark a track solved. Idempotent; unknown ids are ignored.
    pub fn mark_solved(&mut self, missile_id: i64) {
        if let Some(track) = self.tracks.get_mut(&missile_id) {
            track.status = TrackStatus::Solved;
        }
    }

    pub fn get(&self, missile_id: i64) -> Option<&MissileTrack> {
        self.tracks.get(&missile_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.tracks
            .values()
            .filter(|t| t.status == TrackStatus::Active)
            .count()
    }

    /// Tracks in ascending id order, for stable snapshots.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &MissileTrack> {
        let mut tracks: Vec<&MissileTrack> = self.tracks.values().collect();
        tracks.sort_by_key(|t| t.id);
        tracks.into_iter()
    }

    /// Clear everything for a fresh simulation round.
    pub fn reset(&mut self) {
        self.tracks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(id: i64, lon: f64, lat: f64, t: f64) -> Observation {
        Observation {
            missile_id: id,
            position: GeoPoint::new(lon, lat, 0.0),
            time_secs: t,
            missile_type: "Tomahawk".to_string(),
        }
    }

    #[test]
    fn test_first_ping_initiates_active_track() {
        let mut store = TrackStore::new();
        assert_eq!(store.ingest(&obs(1, 0.0, 0.0, 10.0)), PingOutcome::Initiated);
        assert_eq!(store.get(1).unwrap().status, TrackStatus::Active);
    }

    #[test]
    fn test_second_ping_returns_previous_sample() {
        let mut store = TrackStore::new();
        store.ingest(&obs(1, 0.0, 0.0, 10.0));
        match store.ingest(&obs(1, 1.0, 2.0, 11.0)) {
            PingOutcome::Advanced { previous } => {
                assert_eq!(previous.time_secs, 10.0);
                assert_eq!(previous.position, GeoPoint::new(0.0, 0.0, 0.0));
            }
            other => panic!("expected Advanced, got {other:?}"),
        }
        // The newest sample is retained as the next "previous".
        assert_eq!(store.get(1).unwrap().last_sample.time_secs, 11.0);
    }

    #[test]
    fn test_solved_is_terminal() {
        let mut store = TrackStore::new();
        store.ingest(&obs(1, 0.0, 0.0, 10.0));
        store.mark_solved(1);
        assert_eq!(store.ingest(&obs(1, 5.0, 5.0, 12.0)), PingOutcome::AlreadySolved);
        assert_eq!(store.get(1).unwrap().status, TrackStatus::Solved);
        // The solved track keeps its last pre-solve sample.
        assert_eq!(store.get(1).unwrap().last_sample.time_secs, 10.0);
    }

    #[test]
    fn test_tracks_are_independent() {
        let mut store = TrackStore::new();
        store.ingest(&obs(1, 0.0, 0.0, 10.0));
        store.ingest(&obs(2, 9.0, 9.0, 10.0));
        store.mark_solved(1);
        assert_eq!(store.active_count(), 1);
        assert!(matches!(
            store.ingest(&obs(2, 9.5, 9.0, 11.0)),
            PingOutcome::Advanced { .. }
        ));
    }
}
