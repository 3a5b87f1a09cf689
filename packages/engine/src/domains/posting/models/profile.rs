use serde::{Deserialize, Serialize};

use crate::common::WalletId;

/// Contributor profile, keyed by wallet.
///
/// Fetched alongside postings (`FetchResponse.profiles`) and consulted only
/// by the viewer-side filters; the scorers never read profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub wallet: WalletId,
    pub name: String,
    /// "mentor" | "learner", self-declared.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub seniority: Option<String>,
    #[serde(default)]
    pub reputation: i64,
    #[serde(default)]
    pub sessions_completed: i64,
    /// Average session rating, 0.0–5.0.
    #[serde(default)]
    pub rating: Option<f64>,
}
