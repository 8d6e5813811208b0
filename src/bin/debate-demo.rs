use clap::Parser;
use geldwerk::{DebateCoordinator, Evaluation, Participant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "debate-demo")]
#[command(about = "Run the scripted three-agent structured debate demonstration")]
struct Args {
    /// Question to debate
    #[arg(long, default_value = "米国株100%のポートフォリオは妥当か？")]
    question: String,
}

fn participants() -> Vec<Participant> {
    vec![
        Participant::new(
            "philosophy",
            "哲学エージェント",
            "長期・分散・低コストの投資哲学に基づいて評価",
        ),
        Participant::new(
            "statistics",
            "統計エージェント",
            "過去データと統計的手法に基づいて評価",
        ),
        Participant::new(
            "tax",
            "税制エージェント",
            "日本の税制（NISA、iDeCo）の観点から評価",
        ),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut debate = DebateCoordinator::new(participants());

    println!("{}", "=".repeat(70));
    println!("3エージェント構造化議論プロトコル - デモンストレーション");
    println!("{}", "=".repeat(70));

    println!("{}", debate.start_debate(args.question));

    // Round 1: independent initial evaluations.
    println!("{}", debate.start_round(1)?);

    debate.submit_evaluation(
        "philosophy",
        Evaluation::new(
            "philosophy",
            1,
            6.0,
            "全世界分散が投資哲学の原則。米国一極集中はリスクが高い。\
             ただし、米国市場の流動性と透明性は評価できる。\
             緊急資金が確保されていれば許容範囲だが、分散を推奨。",
        ),
    )?;
    debate.submit_evaluation(
        "statistics",
        Evaluation::new(
            "statistics",
            1,
            8.0,
            "過去50年のデータでは、米国株（S&P500）の年率リターンは7-10%。\
             全世界株式より約1-2%高い。ボラティリティはほぼ同等。\
             長期保有なら統計的に有利。リスク調整後リターンも優位。",
        ),
    )?;
    debate.submit_evaluation(
        "tax",
        Evaluation::new(
            "tax",
            1,
            9.0,
            "NISA枠内なら非課税。為替差益も非課税対象。\
             税制上の問題は一切なし。年間360万円の枠を有効活用できる。\
             税引後リターンで見ても合理的。",
        ),
    )?;

    assert!(debate.is_round_complete());
    println!("{}", debate.publish_round_results());

    // Round 2: rebuttals informed by the previous round.
    println!("{}", debate.start_round(2)?);
    let round_one = debate.previous_evaluations(1);
    tracing::debug!(evaluations = round_one.len(), "round 1 handed to participants");

    debate.submit_evaluation(
        "philosophy",
        Evaluation::new("philosophy", 2, 6.0, "評価を維持")
            .with_rebuttal(
                "statistics",
                "過去のパフォーマンスは将来を保証しない。\
                 投資哲学では市場タイミングを取らず、広く分散することで予測不可能なリスクを回避する。",
            )
            .with_rebuttal(
                "tax",
                "節税のために投資原則を曲げるべきではない。\
                 税制優遇は「おまけ」であり、投資判断の主要因ではない。",
            ),
    )?;
    debate.submit_evaluation(
        "statistics",
        Evaluation::new("statistics", 2, 8.0, "評価を維持")
            .with_rebuttal(
                "philosophy",
                "過去50年のデータでは、米国株のリターンが最も高い。\
                 S&P500平均10.5%、全世界株式8.9%。分散効果は限定的で、リターンの差の方が大きい。",
            )
            .with_rebuttal(
                "tax",
                "NISA非課税は年率リターンの約0.4-1.0%相当。投資判断は統計的リターンを優先すべき。",
            ),
    )?;
    debate.submit_evaluation(
        "tax",
        Evaluation::new("tax", 2, 9.0, "評価を維持")
            .with_rebuttal(
                "philosophy",
                "税制優遇は実質的なリターン向上策。1000万円を20年運用した場合、\
                 NISA非課税で約500万円、課税口座で約400万円。差額100万円は無視できない。",
            )
            .with_rebuttal(
                "statistics",
                "税引後リターンで評価すべき。米国株の為替差益は雑所得で最大55%課税。\
                 NISA口座なら為替差益も非課税。",
            ),
    )?;

    println!("{}", debate.publish_round_results());

    // Round 3: final evaluations informed by the rebuttals.
    println!("{}", debate.start_round(3)?);

    debate.submit_evaluation(
        "philosophy",
        Evaluation::new(
            "philosophy",
            3,
            6.0,
            "評価維持: 6.0点。統計エージェントの指摘（米国株の高リターン）は理解するが、\
             投資哲学では予測不可能なリスクを回避することを優先。全世界分散を維持することを推奨。",
        ),
    )?;
    debate.submit_evaluation(
        "statistics",
        Evaluation::new(
            "statistics",
            3,
            7.0,
            "評価修正: 8.0 → 7.0点。哲学エージェントの指摘（予測不可能なリスク）を考慮し、\
             リスク分散のコストとして1-2%のリターン差を許容することも合理的と判断。",
        ),
    )?;
    debate.submit_evaluation(
        "tax",
        Evaluation::new(
            "tax",
            3,
            9.0,
            "評価維持: 9.0点。税制上の評価は変わらず。NISA枠内なら非課税メリットは大きい。",
        ),
    )?;

    println!("{}", debate.publish_round_results());
    println!("{}", debate.final_report());

    Ok(())
}
