//! Monte Carlo projection of a savings plan with normally distributed
//! annual returns.

use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::ToolkitError;

fn default_iterations() -> u32 {
    10_000
}

fn default_years() -> u32 {
    20
}

/// Simulation parameters. Rates are annual fractions (0.07 = 7%), amounts
/// in 万円.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_years")]
    pub years: u32,
    pub expected_return: f64,
    pub volatility: f64,
    pub initial_assets: f64,
    #[serde(default)]
    pub annual_contribution: f64,
}

impl SimulationConfig {
    /// Stock-index defaults: 7% expected return, 18% volatility.
    pub fn stock(initial_assets: f64, annual_contribution: f64) -> Self {
        Self {
            iterations: default_iterations(),
            years: default_years(),
            expected_return: 0.07,
            volatility: 0.18,
            initial_assets,
            annual_contribution,
        }
    }

    /// Bond defaults: 3% expected return, 5% volatility.
    pub fn bond(initial_assets: f64, annual_contribution: f64) -> Self {
        Self {
            expected_return: 0.03,
            volatility: 0.05,
            ..Self::stock(initial_assets, annual_contribution)
        }
    }

    pub fn from_yaml_str(document: &str) -> Result<Self, ToolkitError> {
        let config: Self = serde_yaml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ToolkitError> {
        let path = path.as_ref();
        let document = fs::read_to_string(path)
            .map_err(|_| ToolkitError::ConfigNotFound(path.to_path_buf()))?;
        Self::from_yaml_str(&document)
    }

    pub fn validate(&self) -> Result<(), ToolkitError> {
        if self.iterations == 0 {
            return Err(ToolkitError::InvalidConfig(
                "iterations must be positive".into(),
            ));
        }
        if self.years == 0 {
            return Err(ToolkitError::InvalidConfig("years must be positive".into()));
        }
        if self.volatility < 0.0 {
            return Err(ToolkitError::InvalidConfig(
                "volatility must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub iterations: u32,
    pub years: u32,
    pub mean: f64,
    pub p5: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p95: f64,
    /// Share of paths ending below the total amount paid in, in percent.
    pub loss_probability: f64,
}

impl SimulationSummary {
    pub fn format_report(&self) -> String {
        format!(
            "\n=== モンテカルロシミュレーション結果 ===\n\
             シミュレーション回数: {}回 / 運用期間: {}年\n\n\
             平均値:       {:>12.0}万円\n\
             5パーセンタイル:  {:>12.0}万円\n\
             25パーセンタイル: {:>12.0}万円\n\
             中央値:       {:>12.0}万円\n\
             75パーセンタイル: {:>12.0}万円\n\
             95パーセンタイル: {:>12.0}万円\n\n\
             元本割れ確率: {:.1}%\n",
            self.iterations,
            self.years,
            self.mean,
            self.p5,
            self.p25,
            self.median,
            self.p75,
            self.p95,
            self.loss_probability,
        )
    }
}

/// Runs the configured plan over many return paths. Seed the generator for
/// reproducible runs; unseeded simulators draw from entropy.
pub struct MonteCarloSimulator {
    config: SimulationConfig,
    rng: ChaCha8Rng,
}

impl MonteCarloSimulator {
    pub fn new(config: SimulationConfig) -> Result<Self, ToolkitError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::from_entropy(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(&mut self) -> Result<SimulationSummary, ToolkitError> {
        let config = &self.config;
        let returns = Normal::new(config.expected_return, config.volatility)
            .map_err(|err| ToolkitError::InvalidConfig(err.to_string()))?;

        let paid_in =
            config.initial_assets + config.annual_contribution * config.years as f64;

        let mut finals = Vec::with_capacity(config.iterations as usize);
        let mut losses = 0u32;

        for _ in 0..config.iterations {
            let mut value = config.initial_assets;
            for _ in 0..config.years {
                let annual_return = returns.sample(&mut self.rng);
                value *= 1.0 + annual_return;
                value += config.annual_contribution;
            }
            if value < paid_in {
                losses += 1;
            }
            finals.push(value);
        }

        finals.sort_by(|a, b| a.total_cmp(b));

        let mean = finals.iter().sum::<f64>() / finals.len() as f64;

        Ok(SimulationSummary {
            iterations: config.iterations,
            years: config.years,
            mean,
            p5: percentile(&finals, 5.0),
            p25: percentile(&finals, 25.0),
            median: percentile(&finals, 50.0),
            p75: percentile(&finals, 75.0),
            p95: percentile(&finals, 95.0),
            loss_probability: losses as f64 / config.iterations as f64 * 100.0,
        })
    }
}

/// Linear-interpolation percentile over sorted values.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let low = rank.floor() as usize;
    let high = rank.ceil() as usize;
    if low == high {
        return sorted[low];
    }
    let weight = rank - low as f64;
    sorted[low] * (1.0 - weight) + sorted[high] * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 50.0), 3.0);
        assert_eq!(percentile(&values, 100.0), 5.0);
        assert_eq!(percentile(&values, 25.0), 2.0);
    }

    #[test]
    fn zero_volatility_is_deterministic_compounding() {
        let config = SimulationConfig {
            iterations: 100,
            years: 10,
            expected_return: 0.05,
            volatility: 0.0,
            initial_assets: 1000.0,
            annual_contribution: 0.0,
        };
        let summary = MonteCarloSimulator::new(config)
            .unwrap()
            .with_seed(42)
            .run()
            .unwrap();

        let expected = 1000.0 * 1.05_f64.powi(10);
        assert!((summary.median - expected).abs() < 1e-6);
        assert!((summary.mean - expected).abs() < 1e-6);
        assert_eq!(summary.loss_probability, 0.0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = SimulationConfig::stock(891.4, 150.0);
        let first = MonteCarloSimulator::new(config.clone())
            .unwrap()
            .with_seed(42)
            .run()
            .unwrap();
        let second = MonteCarloSimulator::new(config)
            .unwrap()
            .with_seed(42)
            .run()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn percentiles_are_ordered() {
        let config = SimulationConfig::stock(1000.0, 0.0);
        let summary = MonteCarloSimulator::new(config)
            .unwrap()
            .with_seed(7)
            .run()
            .unwrap();
        assert!(summary.p5 <= summary.p25);
        assert!(summary.p25 <= summary.median);
        assert!(summary.median <= summary.p75);
        assert!(summary.p75 <= summary.p95);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimulationConfig {
            iterations: 0,
            ..SimulationConfig::stock(100.0, 0.0)
        };
        assert!(matches!(
            MonteCarloSimulator::new(config),
            Err(ToolkitError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_loads_from_yaml_with_defaults() {
        let config = SimulationConfig::from_yaml_str(
            "expected_return: 0.07\nvolatility: 0.18\ninitial_assets: 891.4\n",
        )
        .unwrap();
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.years, 20);
        assert_eq!(config.annual_contribution, 0.0);
    }

    #[test]
    fn config_roundtrips_through_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "iterations: 500\nyears: 15\nexpected_return: 0.05\nvolatility: 0.1\ninitial_assets: 300\nannual_contribution: 120\n"
        )
        .unwrap();

        let config = SimulationConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.iterations, 500);
        assert_eq!(config.years, 15);
        assert_eq!(config.annual_contribution, 120.0);

        let missing = SimulationConfig::from_yaml_file("/nonexistent/sim.yaml");
        assert!(matches!(missing, Err(ToolkitError::ConfigNotFound(_))));
    }
}
