//! ROI Scoring Calculator: investment totals, break-even timing and a 0–100
//! desirability score for one education path against one target salary.
//!
//! Pure and total: no I/O, no shared state, and every division is guarded so
//! degenerate inputs (zero duration, zero cost, no salary gain) produce defined
//! values instead of NaN.
//!
//! Algorithm:
//! 1. opportunity cost = monthly baseline income × duration
//! 2. benefit = tuition coverage + monthly housing stipend × duration
//! 3. total investment = out-of-pocket + opportunity cost − housing stipend
//! 4. break-even = total investment / monthly salary gain (None when no gain)
//! 5. earnings: linear ramp entry → median over years 1–5, then 3%/yr compounding
//! 6. ROI% = (earnings − investment) / investment × 100 at 5 and 10 years
//! 7. score = 0.4×break-even + 0.4×ROI + 0.2×duration, each sub-score clamped to 0–100

use serde::{Deserialize, Serialize};

use crate::models::{EducationPath, SalaryProfile, VeteranBaseline};
use crate::roi::housing::HousingBenefitLookup;

pub const PROJECTION_YEARS: usize = 10;
const RAMP_YEARS: u32 = 5;
const POST_RAMP_GROWTH: f64 = 0.03;

const BREAK_EVEN_WEIGHT: f64 = 0.4;
const ROI_WEIGHT: f64 = 0.4;
const DURATION_WEIGHT: f64 = 0.2;

/// Weighted contribution of each dimension to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub break_even: f64, // 0 – 40
    pub roi: f64,        // 0 – 40
    pub duration: f64,   // 0 – 20
}

/// Output of one calculation. Monetary values keep fractional precision;
/// rounding to whole currency units is left to presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    /// Net cost after subtracting the housing stipend. Negative is a favorable outcome.
    pub total_investment: f64,
    /// Tuition coverage plus housing stipend over the program.
    pub benefit_contribution: f64,
    /// Tuition not covered by the benefit.
    pub out_of_pocket: f64,
    /// `None` when the entry salary does not exceed current income: no break-even
    /// within any horizon.
    pub months_to_break_even: Option<i64>,
    pub five_year_roi_percent: i64,
    pub ten_year_roi_percent: i64,
    pub score: u32, // 0 – 100

    pub tuition_coverage: f64,
    pub monthly_housing_benefit: f64,
    pub total_housing_benefit: f64,
    pub total_opportunity_cost: f64,
    pub monthly_gain: f64,
    pub five_year_earnings: f64,
    pub ten_year_earnings: f64,
    pub score_breakdown: ScoreBreakdown,
}

/// Computes the ROI result for one (path, salary, baseline) triple.
pub fn calculate_roi(
    path: &EducationPath,
    salary: &SalaryProfile,
    baseline: &VeteranBaseline,
    housing: &dyn HousingBenefitLookup,
) -> RoiResult {
    let months = f64::from(path.duration_months);

    let monthly_baseline = baseline.current_annual_income / 12.0;
    let total_opportunity_cost = monthly_baseline * months;

    let monthly_housing_benefit = housing.monthly_amount(&baseline.home_state);
    let total_housing_benefit = monthly_housing_benefit * months;
    let tuition_coverage = path.cost * (path.benefit_coverage_percent / 100.0);
    let benefit_contribution = tuition_coverage + total_housing_benefit;

    let out_of_pocket = path.cost - tuition_coverage;
    let total_investment = out_of_pocket + total_opportunity_cost - total_housing_benefit;

    let monthly_gain = (salary.entry_annual - baseline.current_annual_income) / 12.0;
    let months_to_break_even = break_even_months(total_investment, monthly_gain);

    let projection = earnings_projection(salary);
    let five_year_earnings: f64 = projection[..RAMP_YEARS as usize].iter().sum();
    let ten_year_earnings: f64 = projection.iter().sum();

    let five_year_roi_percent = roi_percent(five_year_earnings, total_investment);
    let ten_year_roi_percent = roi_percent(ten_year_earnings, total_investment);

    let score_breakdown = score_breakdown(
        months_to_break_even,
        five_year_roi_percent,
        path.duration_months,
    );
    // Weights sum to 1 over 0–100 sub-scores, so the total stays within 0–100.
    let score = (score_breakdown.break_even + score_breakdown.roi + score_breakdown.duration)
        .round() as u32;

    RoiResult {
        total_investment,
        benefit_contribution,
        out_of_pocket,
        months_to_break_even,
        five_year_roi_percent,
        ten_year_roi_percent,
        score,
        tuition_coverage,
        monthly_housing_benefit,
        total_housing_benefit,
        total_opportunity_cost,
        monthly_gain,
        five_year_earnings,
        ten_year_earnings,
        score_breakdown,
    }
}

/// Projected annual salary for `year` (1-based).
///
/// Years 1–5 interpolate linearly from entry towards median, reaching median
/// exactly at year 5. Later years compound 3% a year from the year-5 level.
pub fn project_annual_salary(salary: &SalaryProfile, year: u32) -> f64 {
    if year <= RAMP_YEARS {
        let progress = f64::from(year) / f64::from(RAMP_YEARS);
        salary.entry_annual + (salary.median_annual - salary.entry_annual) * progress
    } else {
        let years_past_ramp = (year - RAMP_YEARS) as i32;
        salary.median_annual * (1.0 + POST_RAMP_GROWTH).powi(years_past_ramp)
    }
}

/// Annual salaries for years 1 through 10.
pub fn earnings_projection(salary: &SalaryProfile) -> [f64; PROJECTION_YEARS] {
    let mut years = [0.0; PROJECTION_YEARS];
    for (i, slot) in years.iter_mut().enumerate() {
        *slot = project_annual_salary(salary, i as u32 + 1);
    }
    years
}

fn break_even_months(total_investment: f64, monthly_gain: f64) -> Option<i64> {
    if monthly_gain > 0.0 {
        if total_investment <= 0.0 {
            Some(0) // already ahead
        } else {
            Some((total_investment / monthly_gain).round() as i64)
        }
    } else {
        None
    }
}

fn roi_percent(earnings: f64, total_investment: f64) -> i64 {
    if total_investment == 0.0 {
        return 0;
    }
    (((earnings - total_investment) / total_investment) * 100.0).round() as i64
}

fn score_breakdown(
    months_to_break_even: Option<i64>,
    five_year_roi_percent: i64,
    duration_months: u32,
) -> ScoreBreakdown {
    let break_even = match months_to_break_even {
        Some(m) => clamp_score(100.0 - m as f64 * 2.0),
        None => 0.0,
    };
    let roi = clamp_score(five_year_roi_percent as f64 / 5.0);
    let duration = clamp_score(100.0 - f64::from(duration_months) * 2.0);

    ScoreBreakdown {
        break_even: break_even * BREAK_EVEN_WEIGHT,
        roi: roi * ROI_WEIGHT,
        duration: duration * DURATION_WEIGHT,
    }
}

fn clamp_score(raw: f64) -> f64 {
    raw.clamp(0.0, 100.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
