use serde::{Deserialize, Serialize};

/// The kind of program an education path leads through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathType {
    Certificate,
    Associate,
    Bachelor,
    Apprenticeship,
}

/// A candidate plan for reaching a target career.
///
/// Expected ranges: `duration_months > 0`, `cost >= 0`,
/// `0 <= benefit_coverage_percent <= 100`. The calculator does not enforce them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationPath {
    #[serde(rename = "type")]
    pub path_type: PathType,
    pub institution: String,
    pub duration_months: u32,
    /// Program tuition before any benefit coverage.
    pub cost: f64,
    pub benefit_coverage_percent: f64,
    #[serde(default)]
    pub application_url: String,
}
