/// Pure time-to-live evaluation for postings.
///
/// These functions contain NO side effects and are total over all inputs:
/// "garbage in, well-defined garbage out". A negative `ttl_seconds` is not
/// validated by the store and simply evaluates as already expired.
use chrono::{DateTime, Utc};

/// Result of evaluating a posting's TTL at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ExpiryState {
    /// Milliseconds until expiry; negative once past it.
    pub remaining_ms: i64,
    pub expired: bool,
}

/// Evaluate a posting's expiry at `now`.
///
/// `remaining_ms = created_at + ttl_seconds*1000 - now`;
/// `expired` exactly when `remaining_ms <= 0`.
pub fn evaluate_expiry(
    created_at: DateTime<Utc>,
    ttl_seconds: i64,
    now: DateTime<Utc>,
) -> ExpiryState {
    // Saturating throughout: an absurd ttl must clamp, never overflow.
    let remaining_ms = created_at
        .timestamp_millis()
        .saturating_add(ttl_seconds.saturating_mul(1000))
        .saturating_sub(now.timestamp_millis());
    ExpiryState {
        remaining_ms,
        expired: remaining_ms <= 0,
    }
}

/// Remaining minutes, clamped to zero. Feeds the compatibility scorer's
/// time-fit term.
pub fn remaining_minutes(created_at: DateTime<Utc>, ttl_seconds: i64, now: DateTime<Utc>) -> f64 {
    let state = evaluate_expiry(created_at, ttl_seconds, now);
    (state.remaining_ms.max(0) as f64) / 60_000.0
}

/// Human-readable h/m/s breakdown of a remaining-time value.
///
/// Pure string formatting; the UI layers its own styling on top.
pub fn format_remaining(remaining_ms: i64) -> String {
    if remaining_ms <= 0 {
        return "expired".to_string();
    }
    let total_secs = remaining_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
