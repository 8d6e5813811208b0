use std::collections::BTreeMap;

use crate::participants::{Evaluation, Participant};

#[derive(Debug, thiserror::Error)]
pub enum DebateError {
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),
    #[error("no round is open; call start_round first")]
    DebateNotStarted,
    #[error("round {round} is out of range (1..={total})")]
    RoundOutOfRange { round: u32, total: u32 },
    #[error("round {round} cannot follow round {current}; rounds advance forward only")]
    RoundNotSequential { round: u32, current: u32 },
    #[error("evaluation declares round {declared} but round {current} is open")]
    RoundMismatch { declared: u32, current: u32 },
}

/// Procedural facilitator for a fixed-roster, fixed-length debate.
///
/// The coordinator is content-blind: it tracks who submitted what and when,
/// and aggregates scores numerically. It never inspects reasoning text or
/// judges scores. All returned strings are for console display; the
/// coordinator itself performs no I/O.
pub struct DebateCoordinator {
    participants: Vec<Participant>,
    total_rounds: u32,
    current_round: u32,
    question: String,
    submissions: BTreeMap<u32, BTreeMap<String, Evaluation>>,
}

impl DebateCoordinator {
    /// Creates a coordinator over a fixed roster with the default three
    /// rounds. The roster must not be empty.
    pub fn new(participants: Vec<Participant>) -> Self {
        assert!(!participants.is_empty(), "debate roster must not be empty");
        Self {
            participants,
            total_rounds: 3,
            current_round: 0,
            question: String::new(),
            submissions: BTreeMap::new(),
        }
    }

    pub fn with_total_rounds(mut self, total_rounds: u32) -> Self {
        assert!(total_rounds > 0, "a debate needs at least one round");
        self.total_rounds = total_rounds;
        self
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Begins a fresh debate over `question`, discarding any prior session
    /// state. One instance can be reused across independent debates.
    pub fn start_debate(&mut self, question: impl Into<String>) -> String {
        self.question = question.into();
        self.current_round = 0;
        self.submissions.clear();

        tracing::debug!(question = %self.question, "debate started");

        format!(
            "\n=== {}エージェント議論を開始します ===\n\n質問: {}\n\n参加エージェント:\n{}\n議論は{}ラウンド制です。\n",
            self.participants.len(),
            self.question,
            self.format_roster(),
            self.total_rounds,
        )
    }

    /// Opens a round for submissions and returns its instructions.
    ///
    /// Rounds advance forward only: `round` must be the currently open
    /// round (re-opening preserves submissions already filed for it) or the
    /// next one, and must lie in `1..=total_rounds`.
    pub fn start_round(&mut self, round: u32) -> Result<String, DebateError> {
        if round == 0 || round > self.total_rounds {
            return Err(DebateError::RoundOutOfRange {
                round,
                total: self.total_rounds,
            });
        }
        if round != self.current_round && round != self.current_round + 1 {
            return Err(DebateError::RoundNotSequential {
                round,
                current: self.current_round,
            });
        }

        self.current_round = round;
        self.submissions.entry(round).or_default();

        tracing::debug!(round, "round opened");

        let instructions = match round {
            1 => "各エージェントは独立して初回評価を提出してください。",
            2 => "他エージェントの評価を読んで、反論を提出してください。",
            3 => "反論を踏まえて、最終評価を提出してください。",
            _ => "評価を提出してください。",
        };

        Ok(format!(
            "\n=== ラウンド{round}を開始します ===\n{instructions}\n"
        ))
    }

    /// Files `evaluation` under the currently open round for `name`.
    ///
    /// Resubmission within a round overwrites the earlier evaluation (last
    /// write wins); the overwrite is logged at warn level. Failure is
    /// signalled through the returned error only, never through a sentinel
    /// value.
    pub fn submit_evaluation(
        &mut self,
        name: &str,
        evaluation: Evaluation,
    ) -> Result<(), DebateError> {
        if !self.is_registered(name) {
            return Err(DebateError::UnknownParticipant(name.to_string()));
        }
        if self.current_round == 0 {
            return Err(DebateError::DebateNotStarted);
        }
        if evaluation.round != self.current_round {
            return Err(DebateError::RoundMismatch {
                declared: evaluation.round,
                current: self.current_round,
            });
        }

        let bucket = self.submissions.entry(self.current_round).or_default();
        if bucket.insert(name.to_string(), evaluation).is_some() {
            tracing::warn!(
                participant = name,
                round = self.current_round,
                "evaluation resubmitted; previous submission replaced"
            );
        }
        Ok(())
    }

    /// Whether every registered participant has submitted in the currently
    /// open round.
    pub fn is_round_complete(&self) -> bool {
        self.submissions
            .get(&self.current_round)
            .map(|bucket| bucket.len() == self.participants.len())
            .unwrap_or(false)
    }

    /// Renders the currently open round's submissions. Does not require the
    /// round to be complete.
    pub fn publish_round_results(&self) -> String {
        let results = match self.submissions.get(&self.current_round) {
            Some(bucket) if !bucket.is_empty() => bucket,
            _ => return "まだ提出がありません。".to_string(),
        };

        let mut output = format!(
            "\n=== ラウンド{}終了 ===\n全{}/{}エージェントが提出完了\n\n",
            self.current_round,
            results.len(),
            self.participants.len(),
        );

        for evaluation in results.values() {
            output.push_str(&format_evaluation(evaluation));
            output.push('\n');
        }

        output
    }

    /// Returns a copy of the submissions filed for `round`, keyed by
    /// participant name. Participants use this to read the prior round
    /// before composing rebuttals; the coordinator only exposes content on
    /// request, it never pushes it.
    pub fn previous_evaluations(&self, round: u32) -> BTreeMap<String, Evaluation> {
        self.submissions.get(&round).cloned().unwrap_or_default()
    }

    /// Scores from the final round only. Participants who never submitted
    /// in the final round are simply absent.
    pub fn final_scores(&self) -> BTreeMap<String, f64> {
        self.submissions
            .get(&self.total_rounds)
            .map(|bucket| {
                bucket
                    .iter()
                    .map(|(name, evaluation)| (name.clone(), evaluation.score))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Renders the aggregate report over the final round's scores.
    pub fn final_report(&self) -> String {
        let scores = self.final_scores();
        if scores.is_empty() {
            return "最終評価がまだ提出されていません。".to_string();
        }

        let average = scores.values().sum::<f64>() / scores.len() as f64;
        let rule = "=".repeat(50);

        let mut output = format!("\n{rule}\n=== 最終評価 ===\n{rule}\n\n");
        for (name, score) in &scores {
            let role = self
                .participant(name)
                .map(|p| p.role().to_uppercase())
                .unwrap_or_default();
            output.push_str(&format!("{role} ({name}): {score:.1}点\n"));
        }
        output.push_str(&format!("\n総合評価: {average:.2}点\n\n{rule}\n"));

        output
    }

    fn is_registered(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p.name() == name)
    }

    fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name() == name)
    }

    fn format_roster(&self) -> String {
        let mut output = String::new();
        for participant in &self.participants {
            output.push_str(&format!(
                "- {} ({}): {}\n",
                participant.name(),
                participant.role(),
                participant.description(),
            ));
        }
        output
    }
}

fn format_evaluation(evaluation: &Evaluation) -> String {
    let mut output = format!(
        "【{}】\n点数: {:.1}点\n理由: {}\n",
        evaluation.participant, evaluation.score, evaluation.reasoning,
    );

    if !evaluation.rebuttals.is_empty() {
        output.push_str("\n反論:\n");
        for (target, rebuttal) in &evaluation.rebuttals {
            output.push_str(&format!("  → {target}への反論: {rebuttal}\n"));
        }
    }

    output
}
