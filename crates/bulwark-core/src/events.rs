//! Events emitted by the engine for logs, tests, and UI feedback.

use serde::{Deserialize, Serialize};

/// One notable occurrence during a tick. Drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DefenseEvent {
    /// First ping for a missile id; track created.
    TrackInitiated { missile_id: i64 },
    /// Predicted path never threatens a protected point; track solved
    /// without spending inventory.
    ThreatIgnored { missile_id: i64 },
    /// Interceptor committed and the fire solution dispatched.
    BirdAway {
        missile_id: i64,
        interceptor: String,
    },
    /// Threatening, but no interceptor type can reach it yet; retried on
    /// the next ping.
    SolutionDeferred { missile_id: i64 },
    /// Every predicted point was below ground; nothing left to intercept.
    AlreadyImpacted { missile_id: i64 },
    /// Identical timestamps on consecutive pings; extrapolation deferred.
    SampleIntervalRejected { missile_id: i64 },
    /// The whole arsenal is spent; the control loop is finishing.
    ArsenalDepleted,
}
