mod config;
mod errors;
mod jobs;
mod models;
mod roi;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::jobs::{JobSearch, UnconfiguredJobSearch, UsaJobsClient};
use crate::roi::store::RoiStore;
use crate::roi::{HousingBenefitLookup, StaticHousingTable};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Waypoint API v{}", env!("CARGO_PKG_VERSION"));

    let housing = build_housing_table(&config)?;
    let job_search = build_job_search(&config)?;

    let state = AppState {
        config: config.clone(),
        housing,
        roi_store: RoiStore::new(),
        job_search,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict origins to the frontend domain
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Built-in table unless `HOUSING_TABLE_PATH` names a replacement dataset.
fn build_housing_table(config: &Config) -> Result<Arc<dyn HousingBenefitLookup>> {
    let table = match &config.housing_table_path {
        Some(path) => {
            let table = StaticHousingTable::from_json_file(path)?;
            info!(
                "Housing benefit table loaded from {} ({} regions)",
                path.display(),
                table.len()
            );
            table
        }
        None => {
            let table = StaticHousingTable::default();
            info!("Using built-in housing benefit table ({} regions)", table.len());
            table
        }
    };
    Ok(Arc::new(table))
}

fn build_job_search(config: &Config) -> Result<Arc<dyn JobSearch>> {
    match config.usajobs.credentials() {
        Some((api_key, user_agent)) => {
            let client = UsaJobsClient::new(&config.usajobs.base_url, api_key, user_agent)?;
            info!("USAJOBS client initialized ({})", config.usajobs.base_url);
            Ok(Arc::new(client))
        }
        None => {
            warn!("USAJOBS_API_KEY / USAJOBS_USER_AGENT not set; job search disabled");
            Ok(Arc::new(UnconfiguredJobSearch))
        }
    }
}
