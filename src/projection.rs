//! Deterministic compound-growth projection with a phased contribution
//! schedule, used for the retirement-age asset outlook.

use serde::{Deserialize, Serialize};

/// Named macro scenario with its assumed nominal annual return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    Conservative,
    Neutral,
    Optimistic,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::Conservative,
        ScenarioKind::Neutral,
        ScenarioKind::Optimistic,
    ];

    pub fn nominal_return(self) -> f64 {
        match self {
            ScenarioKind::Conservative => 0.05,
            ScenarioKind::Neutral => 0.06,
            ScenarioKind::Optimistic => 0.07,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScenarioKind::Conservative => "保守的",
            ScenarioKind::Neutral => "中立的",
            ScenarioKind::Optimistic => "楽観的",
        }
    }
}

/// A stretch of years with a constant monthly contribution. Amounts are in
/// 万円, matching the narrative reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContributionPhase {
    pub years: u32,
    pub monthly: f64,
}

/// Principal plus a sequence of contribution phases, projected at a nominal
/// annual return and deflated by a constant inflation rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionPlan {
    pub principal: f64,
    pub phases: Vec<ContributionPhase>,
    pub inflation_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOutcome {
    pub nominal: f64,
    pub real: f64,
    pub inflation_multiplier: f64,
}

impl ProjectionPlan {
    pub fn new(principal: f64, inflation_rate: f64) -> Self {
        Self {
            principal,
            phases: Vec::new(),
            inflation_rate,
        }
    }

    pub fn with_phase(mut self, years: u32, monthly: f64) -> Self {
        self.phases.push(ContributionPhase { years, monthly });
        self
    }

    pub fn total_years(&self) -> u32 {
        self.phases.iter().map(|phase| phase.years).sum()
    }

    /// Projects the plan at `annual_return`, compounding each phase in turn
    /// and deflating the result over the full horizon.
    pub fn run(&self, annual_return: f64) -> ProjectionOutcome {
        let mut assets = self.principal;
        for phase in &self.phases {
            assets = future_value(assets, phase.monthly, phase.years, annual_return);
        }

        let inflation_multiplier = (1.0 + self.inflation_rate).powi(self.total_years() as i32);

        ProjectionOutcome {
            nominal: assets,
            real: assets / inflation_multiplier,
            inflation_multiplier,
        }
    }

    pub fn run_scenario(&self, scenario: ScenarioKind) -> ProjectionOutcome {
        self.run(scenario.nominal_return())
    }
}

/// Future value of `principal` compounded annually plus a monthly
/// contribution annuity at the monthly-equivalent rate.
pub fn future_value(principal: f64, monthly_contribution: f64, years: u32, annual_return: f64) -> f64 {
    let grown_principal = principal * (1.0 + annual_return).powi(years as i32);

    let monthly_rate = (1.0 + annual_return).powf(1.0 / 12.0) - 1.0;
    let months = (years * 12) as f64;

    let grown_contributions = if monthly_rate > 0.0 {
        monthly_contribution * (((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate)
    } else {
        monthly_contribution * months
    };

    grown_principal + grown_contributions
}
