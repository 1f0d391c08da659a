//! Federal jobs search. Proxies the USAJOBS search API and normalizes its
//! listings for the frontend.
//!
//! `AppState` holds an `Arc<dyn JobSearch>`: `UsaJobsClient` when credentials are
//! configured, `UnconfiguredJobSearch` otherwise.

pub mod handlers;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;

const DEFAULT_RESULTS_PER_PAGE: u32 = 25;
/// Upper bound accepted by the USAJOBS search endpoint.
pub const MAX_RESULTS_PER_PAGE: u32 = 500;
const MAX_RETRIES: u32 = 3;

// ────────────────────────────────────────────────────────────────────────────
// Public data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchQuery {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub results_per_page: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub location: String,
    pub url: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    /// USAJOBS rate code, e.g. "PA" (per annum) or "PH" (per hour).
    pub rate_interval: Option<String>,
    pub close_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchResponse {
    pub total_count: u64,
    pub page: u32,
    pub listings: Vec<JobListing>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait JobSearch: Send + Sync {
    async fn search(&self, query: &JobSearchQuery) -> Result<JobSearchResponse, AppError>;
}

/// Stand-in used when `USAJOBS_API_KEY` / `USAJOBS_USER_AGENT` are not set.
pub struct UnconfiguredJobSearch;

#[async_trait]
impl JobSearch for UnconfiguredJobSearch {
    async fn search(&self, _query: &JobSearchQuery) -> Result<JobSearchResponse, AppError> {
        Err(AppError::ServiceUnavailable(
            "Job search is not configured on this server".to_string(),
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// USAJOBS wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UsaJobsEnvelope {
    search_result: UsaJobsSearchResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UsaJobsSearchResult {
    #[serde(default)]
    search_result_count_all: u64,
    #[serde(default)]
    search_result_items: Vec<UsaJobsItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UsaJobsItem {
    matched_object_id: String,
    matched_object_descriptor: UsaJobsDescriptor,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UsaJobsDescriptor {
    position_title: String,
    #[serde(default)]
    organization_name: String,
    #[serde(default)]
    position_location_display: String,
    #[serde(rename = "PositionURI", default)]
    position_uri: String,
    #[serde(default)]
    position_remuneration: Vec<UsaJobsRemuneration>,
    #[serde(default)]
    application_close_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UsaJobsRemuneration {
    #[serde(default)]
    minimum_range: Option<String>,
    #[serde(default)]
    maximum_range: Option<String>,
    #[serde(default)]
    rate_interval_code: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// UsaJobsClient
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct UsaJobsClient {
    client: Client,
    base_url: String,
    api_key: String,
    user_agent: String,
}

impl UsaJobsClient {
    pub fn new(base_url: &str, api_key: &str, user_agent: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(20)).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            user_agent: user_agent.to_string(),
        })
    }
}

#[async_trait]
impl JobSearch for UsaJobsClient {
    /// Retries on 429 and 5xx with exponential backoff.
    async fn search(&self, query: &JobSearchQuery) -> Result<JobSearchResponse, AppError> {
        let url = format!("{}/api/search", self.base_url);
        let params = build_query_params(query);
        let mut last_error = String::new();

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 500ms, 1s
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "USAJOBS attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .get(&url)
                .header("User-Agent", &self.user_agent)
                .header("Authorization-Key", &self.api_key)
                .query(&params)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = e.to_string();
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                last_error = format!("USAJOBS returned {status}");
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::Upstream(format!(
                    "USAJOBS returned {status}: {body}"
                )));
            }

            let envelope: UsaJobsEnvelope = response
                .json()
                .await
                .map_err(|e| AppError::Upstream(format!("Malformed USAJOBS response: {e}")))?;

            let normalized = normalize(envelope, query.page.unwrap_or(1));
            debug!(
                "USAJOBS search returned {} of {} listings",
                normalized.listings.len(),
                normalized.total_count
            );
            return Ok(normalized);
        }

        Err(AppError::Upstream(format!(
            "USAJOBS unavailable after {MAX_RETRIES} attempts: {last_error}"
        )))
    }
}

/// Maps our query onto USAJOBS parameter names, dropping blank values.
fn build_query_params(query: &JobSearchQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(keyword) = non_blank(&query.keyword) {
        params.push(("Keyword", keyword.to_string()));
    }
    if let Some(location) = non_blank(&query.location) {
        params.push(("LocationName", location.to_string()));
    }
    let per_page = query
        .results_per_page
        .unwrap_or(DEFAULT_RESULTS_PER_PAGE)
        .clamp(1, MAX_RESULTS_PER_PAGE);
    params.push(("ResultsPerPage", per_page.to_string()));
    params.push(("Page", query.page.unwrap_or(1).max(1).to_string()));
    params
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn normalize(envelope: UsaJobsEnvelope, page: u32) -> JobSearchResponse {
    let result = envelope.search_result;
    let listings = result
        .search_result_items
        .into_iter()
        .map(|item| {
            let d = item.matched_object_descriptor;
            let pay = d.position_remuneration.into_iter().next();
            JobListing {
                id: item.matched_object_id,
                title: d.position_title,
                organization: d.organization_name,
                location: d.position_location_display,
                url: d.position_uri,
                salary_min: pay.as_ref().and_then(|p| parse_amount(&p.minimum_range)),
                salary_max: pay.as_ref().and_then(|p| parse_amount(&p.maximum_range)),
                rate_interval: pay.and_then(|p| p.rate_interval_code),
                close_date: d.application_close_date,
            }
        })
        .collect();

    JobSearchResponse {
        total_count: result.search_result_count_all,
        page: page.max(1),
        listings,
    }
}

fn parse_amount(raw: &Option<String>) -> Option<f64> {
    raw.as_deref()?.trim().parse::<f64>().ok()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
