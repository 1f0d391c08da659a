use std::sync::Arc;

use crate::config::Config;
use crate::jobs::JobSearch;
use crate::roi::HousingBenefitLookup;
use crate::roi::store::RoiStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Region housing benefit table. Default: built-in `StaticHousingTable`.
    pub housing: Arc<dyn HousingBenefitLookup>,
    /// Latest ROI result per session.
    pub roi_store: RoiStore,
    /// Jobs search backend. `UnconfiguredJobSearch` when USAJOBS credentials are absent.
    pub job_search: Arc<dyn JobSearch>,
}
