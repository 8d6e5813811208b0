use std::path::PathBuf;

use clap::Parser;
use geldwerk::{
    AssetAllocation, MonteCarloSimulator, ProjectionPlan, ScenarioKind, SimulationConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asset-projection")]
#[command(about = "Project retirement assets: deterministic scenarios plus Monte Carlo")]
struct Args {
    /// Current invested assets (万円)
    #[arg(long, default_value_t = 891.4)]
    principal: f64,

    /// Monthly contribution for the first phase (万円)
    #[arg(long, default_value_t = 12.3)]
    monthly_initial: f64,

    /// Years in the first contribution phase
    #[arg(long, default_value_t = 2)]
    phase_one_years: u32,

    /// Monthly contribution after the first phase (万円)
    #[arg(long, default_value_t = 16.2)]
    monthly_later: f64,

    /// Total projection horizon in years
    #[arg(long, default_value_t = 19)]
    years: u32,

    /// Assumed annual inflation rate
    #[arg(long, default_value_t = 0.02)]
    inflation: f64,

    /// Stock weight of the Monte Carlo allocation (bond weight is the rest)
    #[arg(long, default_value_t = 0.8)]
    stock_ratio: f64,

    /// Fixed RNG seed for a reproducible simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Optional YAML file overriding the Monte Carlo parameters
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let later_years = args.years.saturating_sub(args.phase_one_years);
    let plan = ProjectionPlan::new(args.principal, args.inflation)
        .with_phase(args.phase_one_years, args.monthly_initial)
        .with_phase(later_years, args.monthly_later);

    println!("{}", "=".repeat(80));
    println!("資産予測シミュレーション");
    println!("{}", "=".repeat(80));
    println!("\n現在の資産: {:.1}万円", args.principal);
    println!(
        "月次積立: {:.1}万円（最初の{}年） / {:.1}万円（以降{}年）",
        args.monthly_initial, args.phase_one_years, args.monthly_later, later_years
    );
    println!("運用期間: {}年 / インフレ率: {:.1}%", args.years, args.inflation * 100.0);

    for scenario in ScenarioKind::ALL {
        let outcome = plan.run_scenario(scenario);
        println!("\n【{}シナリオ】", scenario.label());
        println!("  名目リターン: {:.1}%", scenario.nominal_return() * 100.0);
        println!(
            "  実質リターン: {:.1}%",
            (scenario.nominal_return() - args.inflation) * 100.0
        );
        println!("  資産（名目）: {:.0}万円", outcome.nominal);
        println!("  資産（実質）: {:.0}万円", outcome.real);
    }

    let config = match &args.config {
        Some(path) => SimulationConfig::from_yaml_file(path)?,
        None => {
            let allocation =
                AssetAllocation::new(args.stock_ratio, 1.0 - args.stock_ratio)?;
            SimulationConfig {
                years: args.years,
                expected_return: allocation.expected_return(),
                volatility: allocation.volatility(),
                annual_contribution: args.monthly_later * 12.0,
                ..SimulationConfig::stock(args.principal, 0.0)
            }
        }
    };

    let mut simulator = MonteCarloSimulator::new(config)?;
    if let Some(seed) = args.seed {
        simulator = simulator.with_seed(seed);
    }

    println!("{}", simulator.run()?.format_report());

    Ok(())
}
