/// Pure utility functions for ask/offer compatibility scoring.
///
/// `match_score` is always invoked as `match_score(ask, offer, now)`; the
/// engine never swaps the arguments. The skill term happens to be symmetric
/// but the overall function is only specified for that calling order, so
/// callers must preserve it.
use chrono::{DateTime, Utc};

use crate::domains::posting::utils::remaining_minutes;
use crate::domains::posting::Posting;

/// Skill fit when the two skill strings are equal case-insensitively.
pub const SKILL_FIT_EXACT: f64 = 0.5;

/// Skill fit when one skill string contains the other case-insensitively.
pub const SKILL_FIT_PARTIAL: f64 = 0.3;

/// Ceiling of the time-fit term.
pub const TIME_FIT_MAX: f64 = 0.3;

/// Minutes of mutual remaining availability that max the time-fit term out.
pub const FULL_OVERLAP_MINUTES: f64 = 60.0;

/// Recency fit when the two postings were created within 30 minutes.
pub const RECENCY_FIT_CLOSE: f64 = 0.2;

/// Recency fit when created within 2 hours.
pub const RECENCY_FIT_NEAR: f64 = 0.1;

const CLOSE_WINDOW_MINUTES: f64 = 30.0;
const NEAR_WINDOW_MINUTES: f64 = 120.0;

/// Score an ask/offer pair in `[0, 1]`.
///
/// Compatibility is absent (score 0, not an error) when:
/// - both sides are the same variant (ask/ask or offer/offer)
/// - both sides share a wallet
/// - the sides live in different spaces
///
/// Otherwise the score is `min(1, skill_fit + time_fit + recency_fit)`:
/// - skill fit (max 0.5): 0.5 equal, 0.3 one-way containment, else 0
/// - time fit (max 0.3): linear in the overlap of the two sides' remaining
///   minutes, maxed out at a full 60 minutes of mutual availability
/// - recency fit (max 0.2): 0.2 when created within 30 minutes of each
///   other, 0.1 within 2 hours, else 0
///
/// This is a pure function with no side effects.
pub fn match_score(ask: &Posting, offer: &Posting, now: DateTime<Utc>) -> f64 {
    if ask.kind == offer.kind {
        return 0.0;
    }
    if ask.wallet() == offer.wallet() {
        return 0.0;
    }
    if ask.space_id() != offer.space_id() {
        return 0.0;
    }

    let mut score = 0.0;

    // Skill fit
    let ask_skill = ask.skill().to_lowercase();
    let offer_skill = offer.skill().to_lowercase();
    if ask_skill == offer_skill {
        score += SKILL_FIT_EXACT;
    } else if ask_skill.contains(offer_skill.as_str()) || offer_skill.contains(ask_skill.as_str()) {
        score += SKILL_FIT_PARTIAL;
    }

    // Time fit: overlap of the two sides' remaining minutes (each clamped >= 0)
    let ask_remaining = remaining_minutes(ask.created_at(), ask.ttl_seconds(), now);
    let offer_remaining = remaining_minutes(offer.created_at(), offer.ttl_seconds(), now);
    let overlap = ask_remaining.min(offer_remaining);
    score += TIME_FIT_MAX.min(overlap / FULL_OVERLAP_MINUTES * TIME_FIT_MAX);

    // Recency fit: how close together the two postings were created
    let age_diff_min = (ask.created_at().timestamp_millis()
        - offer.created_at().timestamp_millis())
    .abs() as f64
        / 60_000.0;
    if age_diff_min < CLOSE_WINDOW_MINUTES {
        score += RECENCY_FIT_CLOSE;
    } else if age_diff_min < NEAR_WINDOW_MINUTES {
        score += RECENCY_FIT_NEAR;
    }

    score.min(1.0)
}
