//! Presentation helpers over `RoiResult`: score bands, recommendation text and
//! ranking of several candidate paths for the same career.

use serde::{Deserialize, Serialize};

use crate::models::{EducationPath, SalaryProfile, VeteranBaseline};
use crate::roi::calculator::{calculate_roi, RoiResult};
use crate::roi::housing::HousingBenefitLookup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 70 => ScoreBand::Strong,
            s if s >= 40 => ScoreBand::Moderate,
            _ => ScoreBand::Weak,
        }
    }
}

/// One scored candidate in a comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPath {
    pub rank: usize, // 1-based
    pub path: EducationPath,
    pub result: RoiResult,
    pub band: ScoreBand,
}

/// Builds a short human-readable summary of a result.
pub fn build_recommendation(result: &RoiResult) -> String {
    let break_even = match result.months_to_break_even {
        Some(0) => "you come out ahead from day one".to_string(),
        Some(m) => format!("you break even after about {m} months"),
        None => "the entry salary does not exceed your current income, so it never breaks even"
            .to_string(),
    };

    match ScoreBand::from_score(result.score) {
        ScoreBand::Strong => format!(
            "Strong investment ({}/100): {break_even}, with a {}% five-year return.",
            result.score, result.five_year_roi_percent
        ),
        ScoreBand::Moderate => format!(
            "Reasonable investment ({}/100): {break_even}. Compare shorter or better-covered programs.",
            result.score
        ),
        ScoreBand::Weak => format!(
            "Weak investment ({}/100): {break_even}. Look for higher benefit coverage or a different path.",
            result.score
        ),
    }
}

/// Scores every path and orders them best first.
///
/// Ties on score go to the earlier break-even (no break-even sorts last), then to
/// input order.
pub fn rank_paths(
    paths: &[EducationPath],
    salary: &SalaryProfile,
    baseline: &VeteranBaseline,
    housing: &dyn HousingBenefitLookup,
) -> Vec<RankedPath> {
    let mut scored: Vec<(EducationPath, RoiResult)> = paths
        .iter()
        .map(|p| (p.clone(), calculate_roi(p, salary, baseline, housing)))
        .collect();

    scored.sort_by(|(_, a), (_, b)| {
        b.score.cmp(&a.score).then_with(|| {
            let a_months = a.months_to_break_even.unwrap_or(i64::MAX);
            let b_months = b.months_to_break_even.unwrap_or(i64::MAX);
            a_months.cmp(&b_months)
        })
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (path, result))| RankedPath {
            rank: i + 1,
            band: ScoreBand::from_score(result.score),
            path,
            result,
        })
        .collect()
}
