// Matching domain - the two pure scorers
//
// Relevance orders a viewer's feed; compatibility scores ask/offer pairs.
// Both are side-effect-free functions of an explicit snapshot
// (posting, viewer, now) so recomputation is deterministic.

pub mod utils;

pub use utils::{match_score, relevance_score, skills_equal, skills_related};
