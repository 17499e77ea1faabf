//! Conversions between the wire's clock strings and plain seconds.
//!
//! Inbound sweeps carry an "hour:minute:second" clock; outbound fire
//! orders carry "day/month/2-digit-year hour:minute:second". Both
//! directions run through epoch seconds internally. Outbound timestamps
//! are rendered in UTC so runs are reproducible across hosts.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::errors::DefenseError;

/// Parse an "H:M:S" clock string (seconds may be fractional) into plain
/// seconds.
pub fn clock_to_secs(clock: &str) -> Result<f64, DefenseError> {
    let parts: Vec<&str> = clock.trim().split(':').collect();
    if parts.len() != 3 {
        return Err(DefenseError::malformed(format!(
            "clock string not H:M:S: {clock:?}"
        )));
    }
    let hours: i64 = parts[0]
        .parse()
        .map_err(|_| DefenseError::malformed(format!("bad hour in {clock:?}")))?;
    let minutes: i64 = parts[1]
        .parse()
        .map_err(|_| DefenseError::malformed(format!("bad minute in {clock:?}")))?;
    let seconds: f64 = parts[2]
        .parse()
        .map_err(|_| DefenseError::malformed(format!("bad second in {clock:?}")))?;
    Ok((hours * 3600 + minutes * 60) as f64 + seconds)
}

/// Render plain seconds as an "HH:MM:SS" clock string (whole seconds).
pub fn secs_to_clock(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parse a "year-month-day hour:minute:second[.fraction]" timestamp into
/// epoch seconds, treating the wall time as UTC.
pub fn parse_timestamp(stamp: &str) -> Result<f64, DefenseError> {
    let naive = NaiveDateTime::parse_from_str(stamp.trim(), "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|e| DefenseError::malformed(format!("bad timestamp {stamp:?}: {e}")))?;
    Ok(naive.and_utc().timestamp() as f64)
}

/// Render epoch seconds in the fire-order date format,
/// "day/month/2-digit-year hour:minute:second".
pub fn format_order_time(epoch_secs: f64) -> String {
    let dt: DateTime<Utc> =
        DateTime::from_timestamp(epoch_secs as i64, 0).unwrap_or_else(|| DateTime::UNIX_EPOCH);
    dt.format("%d/%m/%y %H:%M:%S").to_string()
}
