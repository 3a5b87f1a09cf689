//! The viewer-side filter configuration.
//!
//! One explicit structure with named optional fields instead of ad hoc
//! optional parameters. The store applies the skill filter server-side when
//! producing a fetch; the live-merge admission rule re-applies only the
//! skill field; the remaining fields are viewer-side refinements applied to
//! the fetched collection before it reaches the scorers.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::domains::posting::{Posting, Profile};

/// Which side of a mentorship a profile declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentorRole {
    Mentor,
    Learner,
}

impl MentorRole {
    fn matches(&self, declared: &str) -> bool {
        match self {
            MentorRole::Mentor => declared.eq_ignore_ascii_case("mentor"),
            MentorRole::Learner => declared.eq_ignore_ascii_case("learner"),
        }
    }
}

/// Buckets over a posting's TTL. Boundaries are inclusive on the short side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtlBucket {
    /// Up to one hour.
    Short,
    /// Over one hour, up to one day.
    Medium,
    /// Over one day.
    Long,
}

impl TtlBucket {
    pub fn contains(&self, ttl_seconds: i64) -> bool {
        match self {
            TtlBucket::Short => ttl_seconds <= 3_600,
            TtlBucket::Medium => ttl_seconds > 3_600 && ttl_seconds <= 86_400,
            TtlBucket::Long => ttl_seconds > 86_400,
        }
    }
}

/// Inclusive rating range, 0.0–5.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRange {
    pub min: f64,
    pub max: f64,
}

impl RatingRange {
    pub fn contains(&self, rating: f64) -> bool {
        rating >= self.min && rating <= self.max
    }
}

/// The full filter set. Every field optional; an unset field admits
/// everything.
///
/// Matching rules:
/// - `skill`: case-insensitive containment of the filter string in the
///   posting's skill (the same rule the live-merge admission uses)
/// - `name_search`: case-insensitive containment in the profile name
/// - `seniority`: case-insensitive equality with the profile's seniority
/// - `role`: equality with the profile's declared role
/// - `min_reputation` / `min_sessions`: profile value at least the bound
/// - `rating_range`: profile rating inside the inclusive range; profiles
///   with no rating are excluded when the field is set
/// - `ttl_bucket`: the posting's TTL falls in the bucket
///
/// Profile-based fields exclude postings whose wallet has no fetched
/// profile.
#[derive(Debug, Clone, Default, TypedBuilder, Serialize, Deserialize)]
pub struct FeedFilter {
    #[builder(default, setter(strip_option, into))]
    pub skill: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub seniority: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub name_search: Option<String>,
    #[builder(default, setter(strip_option))]
    pub role: Option<MentorRole>,
    #[builder(default, setter(strip_option))]
    pub min_reputation: Option<i64>,
    #[builder(default, setter(strip_option))]
    pub min_sessions: Option<i64>,
    #[builder(default, setter(strip_option))]
    pub rating_range: Option<RatingRange>,
    #[builder(default, setter(strip_option))]
    pub ttl_bucket: Option<TtlBucket>,
}

impl FeedFilter {
    pub fn is_empty(&self) -> bool {
        self.skill.is_none()
            && self.seniority.is_none()
            && self.name_search.is_none()
            && self.role.is_none()
            && self.min_reputation.is_none()
            && self.min_sessions.is_none()
            && self.rating_range.is_none()
            && self.ttl_bucket.is_none()
    }

    /// The live-merge admission rule: only the skill field applies to
    /// pushed events.
    pub fn admits_push(skill_filter: Option<&str>, pushed_skill: &str) -> bool {
        match skill_filter {
            None => true,
            Some(filter) => pushed_skill.to_lowercase().contains(&filter.to_lowercase()),
        }
    }

    /// Viewer-side refinement of a fetched collection.
    pub fn admits(&self, posting: &Posting, profile: Option<&Profile>) -> bool {
        if let Some(skill) = &self.skill {
            if !posting.skill().to_lowercase().contains(&skill.to_lowercase()) {
                return false;
            }
        }
        if let Some(bucket) = &self.ttl_bucket {
            if !bucket.contains(posting.ttl_seconds()) {
                return false;
            }
        }

        let needs_profile = self.seniority.is_some()
            || self.name_search.is_some()
            || self.role.is_some()
            || self.min_reputation.is_some()
            || self.min_sessions.is_some()
            || self.rating_range.is_some();
        if !needs_profile {
            return true;
        }
        let Some(profile) = profile else {
            return false;
        };

        if let Some(name) = &self.name_search {
            if !profile.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(seniority) = &self.seniority {
            match &profile.seniority {
                Some(declared) if declared.eq_ignore_ascii_case(seniority) => {}
                _ => return false,
            }
        }
        if let Some(role) = &self.role {
            match &profile.role {
                Some(declared) if role.matches(declared) => {}
                _ => return false,
            }
        }
        if let Some(min) = self.min_reputation {
            if profile.reputation < min {
                return false;
            }
        }
        if let Some(min) = self.min_sessions {
            if profile.sessions_completed < min {
                return false;
            }
        }
        if let Some(range) = &self.rating_range {
            match profile.rating {
                Some(rating) if range.contains(rating) => {}
                _ => return false,
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{PostingKey, SpaceId, WalletId};
    use crate::domains::posting::{PostingKind, PostingRecord};
    use chrono::{TimeZone, Utc};

    fn posting(skill: &str, ttl_seconds: i64) -> Posting {
        PostingRecord {
            key: PostingKey::new("k"),
            wallet: WalletId::new("0xabc"),
            skill: skill.to_string(),
            space_id: SpaceId::new("s"),
            created_at: Utc.timestamp_millis_opt(0).unwrap(),
            ttl_seconds,
            message: String::new(),
            status: "open".to_string(),
            availability_window: None,
        }
        .into_posting(PostingKind::Ask)
    }

    fn profile() -> Profile {
        Profile {
            wallet: WalletId::new("0xabc"),
            name: "Ada Lovelace".to_string(),
            role: Some("mentor".to_string()),
            seniority: Some("senior".to_string()),
            reputation: 42,
            sessions_completed: 7,
            rating: Some(4.5),
        }
    }

    #[test]
    fn test_empty_filter_admits_everything() {
        let filter = FeedFilter::default();
        assert!(filter.is_empty());
        assert!(filter.admits(&posting("anything", 60), None));
    }

    #[test]
    fn test_push_admission_is_containment() {
        assert!(FeedFilter::admits_push(Some("solidity"), "Solidity Auditing"));
        assert!(!FeedFilter::admits_push(Some("solidity"), "design"));
        assert!(FeedFilter::admits_push(None, "design"));
    }

    #[test]
    fn test_skill_filter_on_fetched_posting() {
        let filter = FeedFilter::builder().skill("rust").build();
        assert!(filter.admits(&posting("Rust Macros", 60), None));
        assert!(!filter.admits(&posting("design", 60), None));
    }

    #[test]
    fn test_ttl_buckets() {
        assert!(TtlBucket::Short.contains(3_600));
        assert!(!TtlBucket::Short.contains(3_601));
        assert!(TtlBucket::Medium.contains(3_601));
        assert!(TtlBucket::Medium.contains(86_400));
        assert!(TtlBucket::Long.contains(86_401));
        let filter = FeedFilter::builder().ttl_bucket(TtlBucket::Short).build();
        assert!(filter.admits(&posting("rust", 1800), None));
        assert!(!filter.admits(&posting("rust", 7200), None));
    }

    #[test]
    fn test_profile_fields_require_a_profile() {
        let filter = FeedFilter::builder().min_reputation(10).build();
        assert!(!filter.admits(&posting("rust", 60), None));
        assert!(filter.admits(&posting("rust", 60), Some(&profile())));
    }

    #[test]
    fn test_name_search_and_role() {
        let filter = FeedFilter::builder()
            .name_search("lovelace")
            .role(MentorRole::Mentor)
            .build();
        assert!(filter.admits(&posting("rust", 60), Some(&profile())));

        let filter = FeedFilter::builder().role(MentorRole::Learner).build();
        assert!(!filter.admits(&posting("rust", 60), Some(&profile())));
    }

    #[test]
    fn test_rating_range_excludes_unrated() {
        let filter = FeedFilter::builder()
            .rating_range(RatingRange { min: 4.0, max: 5.0 })
            .build();
        assert!(filter.admits(&posting("rust", 60), Some(&profile())));

        let mut unrated = profile();
        unrated.rating = None;
        assert!(!filter.admits(&posting("rust", 60), Some(&unrated)));
    }

    #[test]
    fn test_thresholds() {
        let filter = FeedFilter::builder().min_sessions(8).build();
        assert!(!filter.admits(&posting("rust", 60), Some(&profile())));
        let filter = FeedFilter::builder().min_sessions(7).build();
        assert!(filter.admits(&posting("rust", 60), Some(&profile())));
    }
}
