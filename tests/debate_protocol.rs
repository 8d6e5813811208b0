use geldwerk::{DebateCoordinator, DebateError, Evaluation, Participant};

fn roster() -> Vec<Participant> {
    vec![
        Participant::new("philosophy", "哲学エージェント", "投資哲学に基づいて評価"),
        Participant::new("statistics", "統計エージェント", "統計的手法に基づいて評価"),
        Participant::new("tax", "税制エージェント", "日本の税制の観点から評価"),
    ]
}

#[test]
fn full_three_round_debate() {
    let mut debate = DebateCoordinator::new(roster());

    let banner = debate.start_debate("米国株100%のポートフォリオは妥当か？");
    assert!(banner.contains("3エージェント議論を開始します"));
    assert_eq!(debate.current_round(), 0);

    // Round 1: independent evaluations.
    let instructions = debate.start_round(1).unwrap();
    assert!(instructions.contains("独立して初回評価"));

    debate
        .submit_evaluation("philosophy", Evaluation::new("philosophy", 1, 6.0, "分散を推奨"))
        .unwrap();
    debate
        .submit_evaluation("statistics", Evaluation::new("statistics", 1, 8.0, "統計的に有利"))
        .unwrap();
    assert!(!debate.is_round_complete());
    debate
        .submit_evaluation("tax", Evaluation::new("tax", 1, 9.0, "NISA枠内なら非課税"))
        .unwrap();
    assert!(debate.is_round_complete());

    let results = debate.publish_round_results();
    assert!(results.contains("全3/3エージェントが提出完了"));

    // Round 2: rebuttals composed against round 1.
    let instructions = debate.start_round(2).unwrap();
    assert!(instructions.contains("反論を提出"));

    let previous = debate.previous_evaluations(1);
    assert_eq!(previous.len(), 3);
    assert_eq!(previous["statistics"].score, 8.0);

    for name in ["philosophy", "statistics", "tax"] {
        let mut evaluation = Evaluation::new(name, 2, previous[name].score, "評価を維持");
        for target in previous.keys().filter(|target| target.as_str() != name) {
            evaluation = evaluation.with_rebuttal(target.as_str(), format!("{target}の評価への反論"));
        }
        debate.submit_evaluation(name, evaluation).unwrap();
    }
    assert!(debate.is_round_complete());

    // Round 3: final evaluations.
    let instructions = debate.start_round(3).unwrap();
    assert!(instructions.contains("最終評価"));

    for (name, score) in [("philosophy", 6.0), ("statistics", 7.0), ("tax", 9.0)] {
        debate
            .submit_evaluation(name, Evaluation::new(name, 3, score, "最終評価"))
            .unwrap();
    }

    let scores = debate.final_scores();
    assert_eq!(scores.len(), 3);
    assert_eq!(scores["philosophy"], 6.0);
    assert_eq!(scores["statistics"], 7.0);
    assert_eq!(scores["tax"], 9.0);

    let report = debate.final_report();
    assert!(report.contains("=== 最終評価 ==="));
    assert!(report.contains("総合評価: 7.33点"));
}

#[test]
fn coordinator_instance_is_reusable_across_debates() {
    let mut debate = DebateCoordinator::new(roster());

    debate.start_debate("最初の議題");
    debate.start_round(1).unwrap();
    debate
        .submit_evaluation("tax", Evaluation::new("tax", 1, 9.0, "..."))
        .unwrap();

    debate.start_debate("次の議題");
    assert_eq!(debate.current_round(), 0);
    assert_eq!(debate.question(), "次の議題");
    assert!(debate.previous_evaluations(1).is_empty());
    assert_eq!(debate.final_report(), "最終評価がまだ提出されていません。");
}

#[test]
fn late_submissions_into_the_final_round_still_count() {
    let mut debate = DebateCoordinator::new(roster());
    debate.start_debate("議題");
    for round in 1..=3 {
        debate.start_round(round).unwrap();
    }

    // Only one participant makes the deadline; aggregation reflects
    // exactly the submitters present.
    debate
        .submit_evaluation("philosophy", Evaluation::new("philosophy", 3, 6.0, "..."))
        .unwrap();
    assert_eq!(debate.final_scores().len(), 1);

    debate
        .submit_evaluation("statistics", Evaluation::new("statistics", 3, 7.0, "..."))
        .unwrap();
    assert_eq!(debate.final_scores().len(), 2);
}

#[test]
fn five_round_debate_uses_generic_instructions_past_round_three() {
    let mut debate = DebateCoordinator::new(roster()).with_total_rounds(5);
    debate.start_debate("議題");
    for round in 1..=4 {
        debate.start_round(round).unwrap();
    }

    let instructions = debate.start_round(5).unwrap();
    assert!(instructions.contains("評価を提出してください"));
    assert!(matches!(
        debate.start_round(6),
        Err(DebateError::RoundOutOfRange { round: 6, total: 5 })
    ));
}
