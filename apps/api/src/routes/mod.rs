pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::roi::handlers as roi;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // ROI API
        .route("/api/v1/roi/calculate", post(roi::handle_calculate))
        .route("/api/v1/roi/compare", post(roi::handle_compare))
        .route(
            "/api/v1/roi/sessions/:id",
            get(roi::handle_get_latest).delete(roi::handle_clear_session),
        )
        .route(
            "/api/v1/roi/housing/:region",
            get(roi::handle_housing_benefit),
        )
        // Jobs API
        .route("/api/v1/jobs/search", get(jobs::handle_job_search))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, UsaJobsConfig};
    use crate::errors::AppError;
    use crate::jobs::{
        JobListing, JobSearch, JobSearchQuery, JobSearchResponse, UnconfiguredJobSearch,
    };
    use crate::roi::store::RoiStore;
    use crate::roi::StaticHousingTable;

    /// Records the last query and answers with one canned listing.
    #[derive(Default)]
    struct FakeJobSearch {
        last_query: Mutex<Option<JobSearchQuery>>,
    }

    #[async_trait]
    impl JobSearch for FakeJobSearch {
        async fn search(&self, query: &JobSearchQuery) -> Result<JobSearchResponse, AppError> {
            *self.last_query.lock().unwrap() = Some(query.clone());
            Ok(JobSearchResponse {
                total_count: 1,
                page: 1,
                listings: vec![JobListing {
                    id: "1".to_string(),
                    title: "Logistics Management Specialist".to_string(),
                    organization: "Defense Logistics Agency".to_string(),
                    location: "Columbus, Ohio".to_string(),
                    url: "https://www.usajobs.gov/job/1".to_string(),
                    salary_min: Some(68_000.0),
                    salary_max: Some(88_000.0),
                    rate_interval: Some("PA".to_string()),
                    close_date: None,
                }],
            })
        }
    }

    fn test_config() -> Config {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            housing_table_path: None,
            usajobs: UsaJobsConfig {
                base_url: "http://localhost".to_string(),
                api_key: None,
                user_agent: None,
            },
        }
    }

    fn test_state(job_search: Arc<dyn JobSearch>) -> AppState {
        AppState {
            config: test_config(),
            housing: Arc::new(StaticHousingTable::default()),
            roi_store: RoiStore::new(),
            job_search,
        }
    }

    fn test_router() -> Router {
        build_router(test_state(Arc::new(UnconfiguredJobSearch)))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response: Response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn texas_request() -> Value {
        json!({
            "path": {
                "type": "associate",
                "institution": "San Antonio College",
                "durationMonths": 24,
                "cost": 12000,
                "benefitCoveragePercent": 100,
                "applicationUrl": "https://www.alamo.edu/sac/"
            },
            "salary": { "entryAnnual": 55000, "medianAnnual": 75000 },
            "baseline": { "currentAnnualIncome": 45000, "homeState": "TX" }
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(test_router(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["jobSearchEnabled"], false);
    }

    #[tokio::test]
    async fn test_calculate_texas_scenario() {
        let (status, body) = send(
            test_router(),
            post_json("/api/v1/roi/calculate", texas_request()),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["result"]["monthsToBreakEven"], 56);
        assert_eq!(body["result"]["totalInvestment"], 46800.0);
        assert_eq!(body["result"]["outOfPocket"], 0.0);
        assert_eq!(body["result"]["score"], 50);
        assert_eq!(body["band"], "moderate");
        assert!(body["sessionId"].is_string());
    }

    #[tokio::test]
    async fn test_calculate_then_fetch_latest() {
        let router = test_router();
        let session_id = uuid::Uuid::new_v4();
        let mut request = texas_request();
        request["sessionId"] = json!(session_id);

        let (status, _) = send(
            router.clone(),
            post_json("/api/v1/roi/calculate", request),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            router.clone(),
            get(&format!("/api/v1/roi/sessions/{session_id}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"]["institution"], "San Antonio College");
        assert_eq!(body["result"]["score"], 50);

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/roi/sessions/{session_id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(router.clone(), delete).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(
            router,
            get(&format!("/api/v1/roi/sessions/{session_id}")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_calculate_with_career_record() {
        let mut request = texas_request();
        request.as_object_mut().unwrap().remove("salary");
        request["career"] = json!({
            "title": "Network Technician",
            "salary": { "p10": 55000, "median": 75000, "p90": 110000 }
        });

        let (status, body) = send(test_router(), post_json("/api/v1/roi/calculate", request)).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["result"]["monthsToBreakEven"], 56);
    }

    #[tokio::test]
    async fn test_calculate_no_gain_returns_null_break_even() {
        let mut request = texas_request();
        request["salary"] = json!({ "entryAnnual": 40000, "medianAnnual": 60000 });

        let (status, body) = send(test_router(), post_json("/api/v1/roi/calculate", request)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["result"]["monthsToBreakEven"].is_null());
        assert!(body["recommendation"]
            .as_str()
            .unwrap()
            .contains("never breaks even"));
    }

    #[tokio::test]
    async fn test_calculate_rejects_bad_coverage() {
        let mut request = texas_request();
        request["path"]["benefitCoveragePercent"] = json!(150);

        let (status, body) = send(test_router(), post_json("/api/v1/roi/calculate", request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_compare_ranks_paths() {
        let request = json!({
            "paths": [
                {
                    "type": "bachelor",
                    "institution": "UTSA",
                    "durationMonths": 48,
                    "cost": 40000,
                    "benefitCoveragePercent": 50
                },
                {
                    "type": "certificate",
                    "institution": "CompTIA Network+",
                    "durationMonths": 6,
                    "cost": 3000,
                    "benefitCoveragePercent": 100
                }
            ],
            "salary": { "entryAnnual": 55000, "medianAnnual": 75000 },
            "baseline": { "currentAnnualIncome": 45000, "homeState": "tx" }
        });

        let (status, body) = send(test_router(), post_json("/api/v1/roi/compare", request)).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let ranked = body["ranked"].as_array().unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0]["path"]["institution"], "CompTIA Network+");
        assert_eq!(ranked[0]["rank"], 1);
        assert!(ranked[0]["result"]["score"].as_u64() >= ranked[1]["result"]["score"].as_u64());
    }

    #[tokio::test]
    async fn test_compare_requires_paths() {
        let request = json!({
            "paths": [],
            "salary": { "entryAnnual": 55000, "medianAnnual": 75000 },
            "baseline": { "currentAnnualIncome": 45000, "homeState": "TX" }
        });
        let (status, _) = send(test_router(), post_json("/api/v1/roi/compare", request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_housing_lookup_endpoint() {
        let (status, body) = send(test_router(), get("/api/v1/roi/housing/tx")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["region"], "TX");
        assert_eq!(body["monthlyAmount"], 1800.0);

        let (_, body) = send(test_router(), get("/api/v1/roi/housing/PR")).await;
        assert_eq!(body["monthlyAmount"], 1500.0);
    }

    #[tokio::test]
    async fn test_job_search_proxies_query() {
        let fake = Arc::new(FakeJobSearch::default());
        let router = build_router(test_state(fake.clone()));

        let (status, body) = send(
            router,
            get("/api/v1/jobs/search?keyword=logistics&location=Ohio&resultsPerPage=10"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["listings"][0]["salaryMin"], 68000.0);

        let query = fake.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.keyword.as_deref(), Some("logistics"));
        assert_eq!(query.location.as_deref(), Some("Ohio"));
        assert_eq!(query.results_per_page, Some(10));
    }

    #[tokio::test]
    async fn test_job_search_requires_criteria() {
        let fake = Arc::new(FakeJobSearch::default());
        let router = build_router(test_state(fake.clone()));

        let (status, _) = send(router, get("/api/v1/jobs/search?keyword=%20")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(fake.last_query.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_job_search_unconfigured() {
        let (status, body) = send(test_router(), get("/api/v1/jobs/search?keyword=nurse")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }
}
