//! Quantitative stock screening: tier-1 eligibility filters followed by a
//! tier-2 value/quality/momentum scoring rubric (110点満点).
//!
//! Percentages are plain percent values (dividend_yield 2.5 means 2.5%);
//! market cap and free cash flow are in 百万円, volume in 円.

use serde::{Deserialize, Serialize};

/// Fundamental metrics for one listed stock. Fields the data source could
/// not provide are `None` and simply score zero in the affected buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecord {
    pub ticker: String,
    pub name: String,
    pub market_cap: f64,
    pub avg_volume: f64,
    pub pe_ratio: f64,
    pub dividend_yield: f64,
    pub roe: f64,
    pub debt_equity_ratio: f64,
    pub free_cash_flow: f64,
    #[serde(default)]
    pub price_book_ratio: Option<f64>,
    #[serde(default)]
    pub operating_margin: Option<f64>,
    #[serde(default)]
    pub fcf_to_sales: Option<f64>,
    #[serde(default)]
    pub price_change_6m: Option<f64>,
    #[serde(default)]
    pub distance_from_52w_high: Option<f64>,
    #[serde(default)]
    pub consecutive_dividend_years: u32,
    #[serde(default)]
    pub analyst_rating: Option<f64>,
}

/// Tier-1 hard filters. Defaults are the method's baseline: PER 5-30倍,
/// 配当利回り 2.5-6.0%, ROE ≥ 8%, D/E < 200%, フリーCF > 0,
/// 時価総額 ≥ 300億円, 1日出来高 ≥ 1億円.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier1Criteria {
    pub min_pe_ratio: f64,
    pub max_pe_ratio: f64,
    pub min_dividend_yield: f64,
    pub max_dividend_yield: f64,
    pub min_roe: f64,
    pub max_debt_equity_ratio: f64,
    pub min_market_cap: f64,
    pub min_avg_volume: f64,
}

impl Default for Tier1Criteria {
    fn default() -> Self {
        Self {
            min_pe_ratio: 5.0,
            max_pe_ratio: 30.0,
            min_dividend_yield: 2.5,
            max_dividend_yield: 6.0,
            min_roe: 8.0,
            max_debt_equity_ratio: 200.0,
            min_market_cap: 30_000.0,
            min_avg_volume: 100_000_000.0,
        }
    }
}

impl Tier1Criteria {
    pub fn passes(&self, record: &StockRecord) -> bool {
        record.pe_ratio >= self.min_pe_ratio
            && record.pe_ratio <= self.max_pe_ratio
            && record.dividend_yield >= self.min_dividend_yield
            && record.dividend_yield <= self.max_dividend_yield
            && record.roe >= self.min_roe
            && record.debt_equity_ratio < self.max_debt_equity_ratio
            && record.free_cash_flow > 0.0
            && record.market_cap >= self.min_market_cap
            && record.avg_volume >= self.min_avg_volume
    }
}

/// Tier-2 scores for one stock that passed the filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub ticker: String,
    pub name: String,
    pub value_score: u32,
    pub quality_score: u32,
    pub momentum_score: u32,
    pub other_score: u32,
    pub total_score: u32,
}

/// バリューファクター (40点満点): PER 20点 + PBR 10点 + 配当利回り 10点.
pub fn value_score(record: &StockRecord) -> u32 {
    let mut score = 0;

    score += match record.pe_ratio {
        per if per < 10.0 => 20,
        per if per < 15.0 => 15,
        per if per < 20.0 => 10,
        per if per < 30.0 => 5,
        _ => 0,
    };

    if let Some(pbr) = record.price_book_ratio {
        if pbr < 1.0 {
            score += 10;
        } else if pbr < 1.5 {
            score += 5;
        }
    }

    let div_yield = record.dividend_yield;
    if (4.0..=6.0).contains(&div_yield) {
        score += 10;
    } else if (3.0..4.0).contains(&div_yield) {
        score += 5;
    }

    score
}

/// クオリティファクター (40点満点): ROE 15点 + D/E 10点 + 営業利益率 10点
/// + フリーCF/売上高 5点.
pub fn quality_score(record: &StockRecord) -> u32 {
    let mut score = 0;

    score += match record.roe {
        roe if roe >= 30.0 => 15,
        roe if roe >= 15.0 => 10,
        roe if roe >= 10.0 => 5,
        _ => 0,
    };

    if record.debt_equity_ratio < 50.0 {
        score += 10;
    } else if record.debt_equity_ratio < 100.0 {
        score += 5;
    }

    if let Some(margin) = record.operating_margin {
        if margin >= 15.0 {
            score += 10;
        } else if margin >= 10.0 {
            score += 5;
        }
    }

    if let Some(fcf_ratio) = record.fcf_to_sales {
        if fcf_ratio >= 10.0 {
            score += 5;
        }
    }

    score
}

/// モメンタムファクター (20点満点): 6ヶ月株価上昇率 10点 + 52週高値乖離 10点.
pub fn momentum_score(record: &StockRecord) -> u32 {
    let mut score = 0;

    if let Some(change) = record.price_change_6m {
        if change > 20.0 {
            score += 10;
        } else if change > 10.0 {
            score += 7;
        } else if change > 0.0 {
            score += 5;
        }
    }

    if let Some(distance) = record.distance_from_52w_high {
        if distance < 10.0 {
            score += 10;
        } else if distance < 20.0 {
            score += 5;
        }
    }

    score
}

/// その他 (10点満点): 連続増配 5点 + アナリスト推奨 5点.
pub fn other_score(record: &StockRecord) -> u32 {
    let mut score = 0;

    if record.consecutive_dividend_years >= 5 {
        score += 5;
    }

    if let Some(rating) = record.analyst_rating {
        if rating >= 3.5 {
            score += 5;
        }
    }

    score
}

/// Applies the tier-1 filters, scores the survivors, and returns them
/// sorted by total score descending (ticker order breaks ties).
pub fn screen(records: &[StockRecord], criteria: &Tier1Criteria) -> Vec<ScreeningResult> {
    let mut results: Vec<ScreeningResult> = records
        .iter()
        .filter(|record| criteria.passes(record))
        .map(|record| {
            let value = value_score(record);
            let quality = quality_score(record);
            let momentum = momentum_score(record);
            let other = other_score(record);
            ScreeningResult {
                ticker: record.ticker.clone(),
                name: record.name.clone(),
                value_score: value,
                quality_score: quality,
                momentum_score: momentum,
                other_score: other,
                total_score: value + quality + momentum + other,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a.ticker.cmp(&b.ticker))
    });

    results
}
