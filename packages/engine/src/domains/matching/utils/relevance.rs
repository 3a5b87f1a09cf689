/// Pure utility functions for per-viewer relevance ranking.
///
/// These functions contain NO side effects - they implement the business
/// logic for ordering postings in a viewer's feed. The score is a ranking
/// signal only and is never surfaced as an absolute measure.
use chrono::{DateTime, Utc};

use crate::common::ViewerContext;
use crate::domains::posting::Posting;

/// Bonus when the posting's skill overlaps the viewer's skill set.
pub const SKILL_MATCH_BONUS: f64 = 100.0;

/// Ceiling of the recency bonus (a brand-new posting).
pub const RECENCY_BONUS_MAX: f64 = 50.0;

/// Points the recency bonus loses per hour of age. Reaches zero at 25h.
pub const RECENCY_DECAY_PER_HOUR: f64 = 2.0;

/// Bonus for postings authored by someone other than the viewer.
pub const NON_SELF_BONUS: f64 = 10.0;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Case-insensitive skill equality. The graph builder uses this for skill
/// connections; kept here so there is exactly one definition.
pub fn skills_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Symmetric case-insensitive containment between two skill strings.
pub fn skills_related(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(b.as_str()) || b.contains(a.as_str())
}

/// Score a single posting against a viewer at `now`. Higher is more
/// relevant; unbounded above but practically 0–160.
///
/// Algorithm:
/// 1. +100 if any viewer skill and the posting's skill contain each other
///    case-insensitively (either direction)
/// 2. recency: `max(0, 50 - hours_old * 2)`
/// 3. +10 if the posting is not the viewer's own
///
/// This is a pure function with no side effects.
pub fn relevance_score(posting: &Posting, viewer: &ViewerContext, now: DateTime<Utc>) -> f64 {
    let mut score = 0.0;

    if viewer.has_skill_overlap(posting.skill()) {
        score += SKILL_MATCH_BONUS;
    }

    let hours_old =
        (now.timestamp_millis() - posting.created_at().timestamp_millis()) as f64 / MS_PER_HOUR;
    score += (RECENCY_BONUS_MAX - hours_old * RECENCY_DECAY_PER_HOUR).max(0.0);

    if posting.wallet() != &viewer.wallet {
        score += NON_SELF_BONUS;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{PostingKey, SpaceId, WalletId};
    use crate::domains::posting::{PostingKind, PostingRecord};
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn posting(skill: &str, wallet: &str, created_ms: i64) -> Posting {
        PostingRecord {
            key: PostingKey::new("k"),
            wallet: WalletId::new(wallet),
            skill: skill.to_string(),
            space_id: SpaceId::new("s"),
            created_at: at(created_ms),
            ttl_seconds: 3600,
            message: String::new(),
            status: "open".to_string(),
            availability_window: None,
        }
        .into_posting(PostingKind::Ask)
    }

    fn viewer(skills: &[&str]) -> ViewerContext {
        ViewerContext::new(WalletId::new("0xviewer"), skills.iter().copied())
    }

    #[test]
    fn test_fresh_matching_posting_from_other_wallet() {
        let score = relevance_score(&posting("rust", "0xother", 0), &viewer(&["rust"]), at(0));
        assert_eq!(score, 160.0); // 100 skill + 50 recency + 10 non-self
    }

    #[test]
    fn test_skill_match_is_case_insensitive_containment() {
        let v = viewer(&["solidity"]);
        let score = relevance_score(&posting("Solidity Auditing", "0xother", 0), &v, at(0));
        assert_eq!(score, 160.0);
    }

    #[test]
    fn test_containment_works_in_both_directions() {
        let v = viewer(&["react-native"]);
        let score = relevance_score(&posting("React", "0xother", 0), &v, at(0));
        assert_eq!(score, 160.0);
    }

    #[test]
    fn test_no_skill_match() {
        let score = relevance_score(&posting("design", "0xother", 0), &viewer(&["rust"]), at(0));
        assert_eq!(score, 60.0); // 50 recency + 10 non-self
    }

    #[test]
    fn test_recency_decays_two_points_per_hour() {
        let v = viewer(&[]);
        let five_hours = at(5 * 3_600_000);
        let score = relevance_score(&posting("x", "0xother", 0), &v, five_hours);
        assert_eq!(score, 50.0); // 40 recency + 10 non-self
    }

    #[test]
    fn test_recency_bonus_floors_at_zero_after_25_hours() {
        let v = viewer(&[]);
        let day_plus = at(30 * 3_600_000);
        let score = relevance_score(&posting("x", "0xother", 0), &v, day_plus);
        assert_eq!(score, 10.0); // non-self only
    }

    #[test]
    fn test_own_posting_scores_exactly_ten_less() {
        let now = at(0);
        let v = viewer(&["rust"]);
        let own = relevance_score(&posting("rust", "0xviewer", 0), &v, now);
        let other = relevance_score(&posting("rust", "0xother", 0), &v, now);
        assert_eq!(other - own, NON_SELF_BONUS);
    }

    #[test]
    fn test_score_is_non_increasing_in_age() {
        let v = viewer(&["rust"]);
        let mut prev = f64::INFINITY;
        for hours in [0, 1, 5, 10, 24, 25, 48] {
            let score = relevance_score(&posting("rust", "0xother", 0), &v, at(hours * 3_600_000));
            assert!(score <= prev, "score increased at {}h", hours);
            prev = score;
        }
    }

    #[test]
    fn test_skills_equal_and_related_helpers() {
        assert!(skills_equal("Rust", "rust"));
        assert!(!skills_equal("rust", "rust-async"));
        assert!(skills_related("rust", "Rust-Async"));
        assert!(skills_related("Rust-Async", "rust"));
        assert!(!skills_related("go", "rust"));
    }
}
