//! Axum route handlers for the ROI API.
//!
//! Input validation happens here; `calculate_roi` itself accepts anything.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CareerRecord, EducationPath, SalaryProfile, VeteranBaseline};
use crate::roi::store::RoiRecord;
use crate::roi::summary::{build_recommendation, rank_paths, RankedPath, ScoreBand};
use crate::roi::{calculate_roi, RoiResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRoiRequest {
    /// Omit to start a new session.
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub path: EducationPath,
    #[serde(default)]
    pub salary: Option<SalaryProfile>,
    #[serde(default)]
    pub career: Option<CareerRecord>,
    pub baseline: VeteranBaseline,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRoiResponse {
    pub session_id: Uuid,
    pub result: RoiResult,
    pub band: ScoreBand,
    pub recommendation: String,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRoiRequest {
    pub paths: Vec<EducationPath>,
    #[serde(default)]
    pub salary: Option<SalaryProfile>,
    #[serde(default)]
    pub career: Option<CareerRecord>,
    pub baseline: VeteranBaseline,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRoiResponse {
    pub salary: SalaryProfile,
    pub ranked: Vec<RankedPath>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingBenefitResponse {
    pub region: String,
    pub monthly_amount: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/roi/calculate
///
/// Scores one education path and stores it as the session's latest result.
pub async fn handle_calculate(
    State(state): State<AppState>,
    Json(request): Json<CalculateRoiRequest>,
) -> Result<Json<CalculateRoiResponse>, AppError> {
    let salary = resolve_salary(request.salary, request.career.as_ref())?;
    validate_path(&request.path)?;
    validate_baseline(&request.baseline)?;

    let result = calculate_roi(
        &request.path,
        &salary,
        &request.baseline,
        state.housing.as_ref(),
    );

    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);
    debug!(
        "ROI for session {session_id}: {} ({} months) → score {}",
        request.path.institution, request.path.duration_months, result.score
    );

    let record = state.roi_store.record(session_id, request.path, result);
    let band = ScoreBand::from_score(record.result.score);
    let recommendation = build_recommendation(&record.result);

    Ok(Json(CalculateRoiResponse {
        session_id,
        result: record.result,
        band,
        recommendation,
        computed_at: record.computed_at,
    }))
}

/// POST /api/v1/roi/compare
///
/// Scores several candidate paths for the same career, best first. Nothing is stored.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRoiRequest>,
) -> Result<Json<CompareRoiResponse>, AppError> {
    if request.paths.is_empty() {
        return Err(AppError::Validation(
            "paths must contain at least one education path".to_string(),
        ));
    }
    let salary = resolve_salary(request.salary, request.career.as_ref())?;
    for path in &request.paths {
        validate_path(path)?;
    }
    validate_baseline(&request.baseline)?;

    let ranked = rank_paths(
        &request.paths,
        &salary,
        &request.baseline,
        state.housing.as_ref(),
    );
    info!("Compared {} education paths", ranked.len());

    Ok(Json(CompareRoiResponse { salary, ranked }))
}

/// GET /api/v1/roi/sessions/:id
pub async fn handle_get_latest(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<RoiRecord>, AppError> {
    state
        .roi_store
        .latest(session_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No ROI result for session {session_id}")))
}

/// DELETE /api/v1/roi/sessions/:id
pub async fn handle_clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.roi_store.clear(session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No ROI result for session {session_id}"
        )))
    }
}

/// GET /api/v1/roi/housing/:region
pub async fn handle_housing_benefit(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Json<HousingBenefitResponse> {
    let monthly_amount = state.housing.monthly_amount(&region);
    Json(HousingBenefitResponse {
        region: region.trim().to_uppercase(),
        monthly_amount,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// Exactly one of an explicit salary profile or a career record must be supplied.
fn resolve_salary(
    salary: Option<SalaryProfile>,
    career: Option<&CareerRecord>,
) -> Result<SalaryProfile, AppError> {
    let profile = match (salary, career) {
        (Some(salary), None) => salary,
        (None, Some(career)) => SalaryProfile::from_career(career),
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "provide either salary or career, not both".to_string(),
            ))
        }
        (None, None) => {
            return Err(AppError::Validation(
                "salary or career is required".to_string(),
            ))
        }
    };
    require_non_negative("salary.entryAnnual", profile.entry_annual)?;
    require_non_negative("salary.medianAnnual", profile.median_annual)?;
    Ok(profile)
}

fn validate_path(path: &EducationPath) -> Result<(), AppError> {
    require_non_negative("path.cost", path.cost)?;
    let coverage = path.benefit_coverage_percent;
    if !coverage.is_finite() || !(0.0..=100.0).contains(&coverage) {
        return Err(AppError::Validation(format!(
            "path.benefitCoveragePercent must be between 0 and 100, got {coverage}"
        )));
    }
    Ok(())
}

fn validate_baseline(baseline: &VeteranBaseline) -> Result<(), AppError> {
    require_non_negative("baseline.currentAnnualIncome", baseline.current_annual_income)?;
    if baseline.home_state.trim().is_empty() {
        return Err(AppError::Validation(
            "baseline.homeState cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}
