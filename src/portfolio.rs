//! Expected return, volatility and Sharpe ratio of a two-class stock/bond
//! allocation.

use serde::{Deserialize, Serialize};

use crate::error::ToolkitError;

/// Annualized return/volatility assumptions for one asset class, as
/// fractions (0.07 = 7%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetClassStats {
    pub expected_return: f64,
    pub volatility: f64,
}

impl AssetClassStats {
    pub const STOCK: AssetClassStats = AssetClassStats {
        expected_return: 0.07,
        volatility: 0.18,
    };

    pub const BOND: AssetClassStats = AssetClassStats {
        expected_return: 0.03,
        volatility: 0.05,
    };

    pub const BALANCED: AssetClassStats = AssetClassStats {
        expected_return: 0.05,
        volatility: 0.10,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub expected_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
}

/// Stock/bond weights summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetAllocation {
    stock_ratio: f64,
    bond_ratio: f64,
}

impl AssetAllocation {
    /// Stock/bond correlation assumed in the volatility calculation.
    const CORRELATION: f64 = 0.2;

    pub fn new(stock_ratio: f64, bond_ratio: f64) -> Result<Self, ToolkitError> {
        if stock_ratio < 0.0 || bond_ratio < 0.0 {
            return Err(ToolkitError::InvalidAllocation(
                "ratios must be non-negative".into(),
            ));
        }
        if (stock_ratio + bond_ratio - 1.0).abs() > 1e-9 {
            return Err(ToolkitError::InvalidAllocation(format!(
                "ratios must sum to 1.0, got {}",
                stock_ratio + bond_ratio
            )));
        }
        Ok(Self {
            stock_ratio,
            bond_ratio,
        })
    }

    pub fn stock_ratio(&self) -> f64 {
        self.stock_ratio
    }

    pub fn bond_ratio(&self) -> f64 {
        self.bond_ratio
    }

    /// Weighted average of the class expected returns.
    pub fn expected_return(&self) -> f64 {
        self.stock_ratio * AssetClassStats::STOCK.expected_return
            + self.bond_ratio * AssetClassStats::BOND.expected_return
    }

    /// Two-asset portfolio volatility with the fixed stock/bond correlation.
    pub fn volatility(&self) -> f64 {
        let stock = AssetClassStats::STOCK.volatility;
        let bond = AssetClassStats::BOND.volatility;
        let variance = self.stock_ratio.powi(2) * stock.powi(2)
            + self.bond_ratio.powi(2) * bond.powi(2)
            + 2.0 * self.stock_ratio * self.bond_ratio * Self::CORRELATION * stock * bond;
        variance.sqrt()
    }

    pub fn sharpe_ratio(&self, risk_free_rate: f64) -> f64 {
        let volatility = self.volatility();
        if volatility == 0.0 {
            return 0.0;
        }
        (self.expected_return() - risk_free_rate) / volatility
    }

    pub fn stats(&self, risk_free_rate: f64) -> PortfolioStats {
        PortfolioStats {
            expected_return: self.expected_return(),
            volatility: self.volatility(),
            sharpe_ratio: self.sharpe_ratio(risk_free_rate),
        }
    }
}

impl Default for AssetAllocation {
    /// The toolkit's standard 80/20 stock/bond split.
    fn default() -> Self {
        Self {
            stock_ratio: 0.8,
            bond_ratio: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_must_sum_to_one() {
        assert!(AssetAllocation::new(0.8, 0.2).is_ok());
        assert!(matches!(
            AssetAllocation::new(0.8, 0.3),
            Err(ToolkitError::InvalidAllocation(_))
        ));
        assert!(matches!(
            AssetAllocation::new(-0.1, 1.1),
            Err(ToolkitError::InvalidAllocation(_))
        ));
    }

    #[test]
    fn pure_stock_matches_class_stats() {
        let allocation = AssetAllocation::new(1.0, 0.0).unwrap();
        assert!((allocation.expected_return() - 0.07).abs() < 1e-12);
        assert!((allocation.volatility() - 0.18).abs() < 1e-12);
    }

    #[test]
    fn default_split_blends_returns() {
        let allocation = AssetAllocation::default();
        let expected = 0.8 * 0.07 + 0.2 * 0.03;
        assert!((allocation.expected_return() - expected).abs() < 1e-12);
        // Diversification keeps volatility below the weighted average.
        assert!(allocation.volatility() < 0.8 * 0.18 + 0.2 * 0.05);
    }

    #[test]
    fn sharpe_ratio_uses_excess_return() {
        let allocation = AssetAllocation::new(1.0, 0.0).unwrap();
        let sharpe = allocation.sharpe_ratio(0.01);
        assert!((sharpe - (0.07 - 0.01) / 0.18).abs() < 1e-12);
    }
}
