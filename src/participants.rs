use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A named member of a debate roster. Immutable once constructed; the
/// roster of a [`crate::DebateCoordinator`] is fixed for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    name: String,
    role: String,
    description: String,
}

impl Participant {
    /// Creates a participant. The name is the stable key used for
    /// submissions and rebuttal targets; it must not be empty.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        assert!(!name.trim().is_empty(), "participant name must not be empty");
        Self {
            name,
            role: role.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One participant's scored judgment for one round.
///
/// Scores are conventionally on a 0-10 scale but the model does not
/// enforce bounds; that is the embedding application's call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub participant: String,
    pub round: u32,
    pub score: f64,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rebuttals: BTreeMap<String, String>,
    pub submitted_at: DateTime<Local>,
}

impl Evaluation {
    pub fn new(
        participant: impl Into<String>,
        round: u32,
        score: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            participant: participant.into(),
            round,
            score,
            reasoning: reasoning.into(),
            rebuttals: BTreeMap::new(),
            submitted_at: Local::now(),
        }
    }

    /// Attaches a rebuttal addressed to another participant's prior-round
    /// evaluation.
    pub fn with_rebuttal(mut self, target: impl Into<String>, content: impl Into<String>) -> Self {
        self.rebuttals.insert(target.into(), content.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuttals_accumulate() {
        let eval = Evaluation::new("philosophy", 2, 6.0, "評価を維持")
            .with_rebuttal("statistics", "過去のパフォーマンスは将来を保証しない")
            .with_rebuttal("tax", "節税のために投資原則を曲げるべきではない");

        assert_eq!(eval.rebuttals.len(), 2);
        assert!(eval.rebuttals.contains_key("statistics"));
    }

    #[test]
    #[should_panic(expected = "participant name must not be empty")]
    fn empty_name_rejected() {
        Participant::new("  ", "philosophy", "desc");
    }

    #[test]
    fn evaluation_serializes_without_empty_rebuttals() {
        let eval = Evaluation::new("tax", 1, 9.0, "NISA枠内なら非課税。");
        let json = serde_json::to_value(&eval).unwrap();
        assert!(json.get("rebuttals").is_none());
        assert_eq!(json["score"], 9.0);
    }
}
