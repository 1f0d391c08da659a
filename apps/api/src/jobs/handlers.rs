//! Axum route handlers for the jobs search proxy.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::AppError;
use crate::jobs::{non_blank, JobSearchQuery, JobSearchResponse};
use crate::state::AppState;

/// GET /api/v1/jobs/search?keyword=&location=&resultsPerPage=&page=
pub async fn handle_job_search(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Result<Json<JobSearchResponse>, AppError> {
    if non_blank(&query.keyword).is_none() && non_blank(&query.location).is_none() {
        return Err(AppError::Validation(
            "keyword or location is required".to_string(),
        ));
    }

    let response = state.job_search.search(&query).await?;
    Ok(Json(response))
}
