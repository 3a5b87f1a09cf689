// Common types shared across domains and the kernel.
//
// These sit here (rather than in a domain) so the scorers, the graph
// builder, and the session loop can all reference them without circular
// imports.

use serde::{Deserialize, Serialize};

use super::WalletId;

/// The viewer a ranking is computed for.
///
/// Supplied by the surrounding system (wallet provider + profile form);
/// the engine never derives it. Skills are stored lower-cased so every
/// containment test downstream can compare directly; the field stays
/// private so only the normalizing constructor can populate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerContext {
    pub wallet: WalletId,
    #[serde(deserialize_with = "normalized_skills")]
    skills: Vec<String>,
}

/// Applies the same normalization as [`ViewerContext::new`] when the context
/// arrives over the wire instead of through the constructor.
fn normalized_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect())
}

impl ViewerContext {
    pub fn new(wallet: WalletId, skills: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            wallet,
            skills: skills
                .into_iter()
                .map(|s| s.into().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Normalized (lower-cased, trimmed, non-empty) skill list.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Symmetric, case-insensitive containment test against one skill string.
    ///
    /// True when any viewer skill is a substring of `skill` or `skill` is a
    /// substring of any viewer skill.
    pub fn has_skill_overlap(&self, skill: &str) -> bool {
        let skill = skill.to_lowercase();
        self.skills
            .iter()
            .any(|own| skill.contains(own.as_str()) || own.contains(skill.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_are_lowercased_and_trimmed() {
        let viewer = ViewerContext::new(WalletId::new("0x1"), ["  Rust ", "Solidity", ""]);
        assert_eq!(viewer.skills(), ["rust", "solidity"]);
    }

    #[test]
    fn test_deserialized_skills_are_normalized_too() {
        let viewer: ViewerContext = serde_json::from_value(serde_json::json!({
            "wallet": "0x1",
            "skills": ["  Rust ", "SOLIDITY", ""]
        }))
        .unwrap();
        assert_eq!(viewer.skills(), ["rust", "solidity"]);
        assert!(viewer.has_skill_overlap("Rust"));
    }

    #[test]
    fn test_skill_overlap_is_symmetric_containment() {
        let viewer = ViewerContext::new(WalletId::new("0x1"), ["react"]);
        // viewer skill contained in posting skill
        assert!(viewer.has_skill_overlap("React-Native"));
        // posting skill contained in viewer skill
        let viewer = ViewerContext::new(WalletId::new("0x1"), ["react-native"]);
        assert!(viewer.has_skill_overlap("React"));
    }

    #[test]
    fn test_no_overlap() {
        let viewer = ViewerContext::new(WalletId::new("0x1"), ["design"]);
        assert!(!viewer.has_skill_overlap("rust"));
    }
}
