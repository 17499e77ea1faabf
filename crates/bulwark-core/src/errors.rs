//! Error taxonomy for the defense pipeline.
//!
//! Collaborator and parsing failures are caught at operation boundaries
//! and logged; only `InventoryDepleted` may change the control loop's
//! state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DefenseError {
    /// Attacker endpoint or another collaborator could not be reached.
    #[error("collaborator unavailable ({what}): {detail}")]
    CollaboratorUnavailable { what: String, detail: String },

    /// Two radar samples with identical timestamps; velocity is
    /// undefined and extrapolation is deferred to the next ping.
    #[error("invalid sample interval for missile {missile_id}")]
    InvalidSampleInterval { missile_id: i64 },

    /// No battery exists to launch from; planning retried next tick.
    #[error("no interceptor battery available")]
    NoInterceptorBattery,

    /// Every interceptor type is at zero stock. Fatal for the running
    /// control loop.
    #[error("interceptor inventory depleted")]
    InventoryDepleted,

    /// An inbound sweep item or manifest is missing expected fields.
    #[error("malformed payload: {detail}")]
    MalformedPayload { detail: String },

    /// Startup configuration could not be loaded or is inconsistent.
    #[error("invalid configuration: {detail}")]
    InvalidConfig { detail: String },
}

impl DefenseError {
    pub fn unavailable(what: &str, detail: impl ToString) -> Self {
        Self::CollaboratorUnavailable {
            what: what.to_string(),
            detail: detail.to_string(),
        }
    }

    pub fn malformed(detail: impl ToString) -> Self {
        Self::MalformedPayload {
            detail: detail.to_string(),
        }
    }
}
