//! Region housing benefit lookup.
//!
//! The calculator only sees the `HousingBenefitLookup` trait. `AppState` holds an
//! `Arc<dyn HousingBenefitLookup>`, built from the static table or from a JSON
//! dataset named by `HOUSING_TABLE_PATH`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Monthly amount used for regions missing from the table.
pub const DEFAULT_MONTHLY_HOUSING_BENEFIT: f64 = 1500.0;

/// Built-in monthly housing stipend by state code.
const STATIC_RATES: &[(&str, f64)] = &[
    ("AK", 2400.0),
    ("AZ", 1750.0),
    ("CA", 2800.0),
    ("CO", 2150.0),
    ("DC", 3100.0),
    ("FL", 1950.0),
    ("GA", 1700.0),
    ("HI", 3000.0),
    ("IL", 1850.0),
    ("MA", 2900.0),
    ("NC", 1650.0),
    ("NY", 2700.0),
    ("OH", 1450.0),
    ("PA", 1600.0),
    ("TX", 1800.0),
    ("VA", 2250.0),
    ("WA", 2450.0),
];

/// Maps a region code to a monthly housing benefit amount.
pub trait HousingBenefitLookup: Send + Sync {
    fn monthly_amount(&self, region: &str) -> f64;
}

/// Region table with a fallback amount for unmapped codes.
#[derive(Debug, Clone)]
pub struct StaticHousingTable {
    rates: HashMap<String, f64>,
    default_amount: f64,
}

#[derive(Debug, Deserialize)]
struct HousingTableFile {
    #[serde(default)]
    default: Option<f64>,
    regions: HashMap<String, f64>,
}

impl StaticHousingTable {
    pub fn new(rates: impl IntoIterator<Item = (String, f64)>, default_amount: f64) -> Self {
        Self {
            rates: rates
                .into_iter()
                .map(|(code, amount)| (normalize_region(&code), amount))
                .collect(),
            default_amount,
        }
    }

    /// Loads a replacement dataset: `{"default": 1500, "regions": {"TX": 1800}}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read housing table {}", path.display()))?;
        let file: HousingTableFile = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid housing table JSON in {}", path.display()))?;

        let default_amount = file.default.unwrap_or(DEFAULT_MONTHLY_HOUSING_BENEFIT);
        check_amount("default", default_amount)?;
        for (code, amount) in &file.regions {
            check_amount(code, *amount)?;
        }

        Ok(Self::new(file.regions, default_amount))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

impl Default for StaticHousingTable {
    fn default() -> Self {
        Self::new(
            STATIC_RATES
                .iter()
                .map(|(code, amount)| (code.to_string(), *amount)),
            DEFAULT_MONTHLY_HOUSING_BENEFIT,
        )
    }
}

impl HousingBenefitLookup for StaticHousingTable {
    fn monthly_amount(&self, region: &str) -> f64 {
        self.rates
            .get(&normalize_region(region))
            .copied()
            .unwrap_or(self.default_amount)
    }
}

fn normalize_region(code: &str) -> String {
    code.trim().to_uppercase()
}

fn check_amount(label: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        bail!("Housing benefit for '{label}' must be a non-negative number, got {amount}");
    }
    Ok(())
}
