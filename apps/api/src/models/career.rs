use serde::{Deserialize, Serialize};

/// Annual wage percentiles for an occupation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPercentiles {
    pub p10: f64,
    #[serde(default)]
    pub p25: Option<f64>,
    pub median: f64,
    #[serde(default)]
    pub p75: Option<f64>,
    #[serde(default)]
    pub p90: Option<f64>,
}

/// A target career as delivered by the career data feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecord {
    pub title: String,
    /// Occupation code (e.g. SOC "47-2111"), when known.
    #[serde(default)]
    pub code: Option<String>,
    pub salary: SalaryPercentiles,
}

/// Salary figures the ROI calculator works from.
///
/// `median_annual >= entry_annual` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryProfile {
    /// Entry level pay (10th percentile).
    pub entry_annual: f64,
    /// Pay at the five-year mark (median).
    pub median_annual: f64,
}

impl SalaryProfile {
    pub fn from_career(career: &CareerRecord) -> Self {
        Self {
            entry_annual: career.salary.p10,
            median_annual: career.salary.median,
        }
    }
}
