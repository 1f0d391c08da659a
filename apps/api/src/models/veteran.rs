use serde::{Deserialize, Serialize};

/// Income reference point before the career transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeteranBaseline {
    pub current_annual_income: f64,
    /// Region code used for the housing benefit lookup (e.g. "TX").
    pub home_state: String,
}
