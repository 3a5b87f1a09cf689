use serde::Serialize;

use crate::common::PostingKey;

/// Why two nodes are linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    /// Both postings name the same skill (case-insensitive equality).
    Skill,
    /// A plausible ask/offer mentorship pairing; carries the match score.
    Match,
    /// Same contributor on both endpoints. Present in the model but never
    /// emitted by the default builder. Reserved for a future view; do not
    /// wire it up without a requirements change.
    Wallet,
}

impl std::fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionKind::Skill => write!(f, "skill"),
            ConnectionKind::Match => write!(f, "match"),
            ConnectionKind::Wallet => write!(f, "wallet"),
        }
    }
}

/// An edge of the derived graph. Ephemeral, like [`super::GraphNode`].
#[derive(Debug, Clone, Serialize)]
pub struct Connection {
    pub from: PostingKey,
    pub to: PostingKey,
    pub kind: ConnectionKind,
    /// Match connections only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Connection {
    pub fn skill(from: PostingKey, to: PostingKey) -> Self {
        Self {
            from,
            to,
            kind: ConnectionKind::Skill,
            score: None,
        }
    }

    pub fn matched(from: PostingKey, to: PostingKey, score: f64) -> Self {
        Self {
            from,
            to,
            kind: ConnectionKind::Match,
            score: Some(score),
        }
    }

    /// Direction-independent dedup key: the same endpoint pair produces the
    /// same key regardless of which side discovered it first.
    pub fn pair_key(&self) -> (String, String, ConnectionKind) {
        let a = self.from.as_str();
        let b = self.to.as_str();
        if a <= b {
            (a.to_string(), b.to_string(), self.kind)
        } else {
            (b.to_string(), a.to_string(), self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_ignores_direction() {
        let ab = Connection::skill(PostingKey::new("a"), PostingKey::new("b"));
        let ba = Connection::skill(PostingKey::new("b"), PostingKey::new("a"));
        assert_eq!(ab.pair_key(), ba.pair_key());
    }

    #[test]
    fn test_pair_key_distinguishes_kinds() {
        let skill = Connection::skill(PostingKey::new("a"), PostingKey::new("b"));
        let matched = Connection::matched(PostingKey::new("a"), PostingKey::new("b"), 0.5);
        assert_ne!(skill.pair_key(), matched.pair_key());
    }
}
