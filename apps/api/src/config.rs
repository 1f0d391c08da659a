use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_USAJOBS_BASE_URL: &str = "https://data.usajobs.gov";

/// Application configuration loaded from environment variables.
/// Fails at startup if a present variable cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Optional JSON dataset replacing the built-in housing benefit table.
    pub housing_table_path: Option<PathBuf>,
    pub usajobs: UsaJobsConfig,
}

/// Credentials for the federal jobs-search API.
/// Job search is only enabled when both the key and the user agent are set.
#[derive(Debug, Clone)]
pub struct UsaJobsConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub user_agent: Option<String>,
}

impl UsaJobsConfig {
    /// Returns `(api_key, user_agent)` when job search can be enabled.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.api_key.as_deref(), self.user_agent.as_deref()) {
            (Some(key), Some(agent)) => Some((key, agent)),
            _ => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            housing_table_path: optional_env("HOUSING_TABLE_PATH").map(PathBuf::from),
            usajobs: UsaJobsConfig {
                base_url: optional_env("USAJOBS_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_USAJOBS_BASE_URL.to_string()),
                api_key: optional_env("USAJOBS_API_KEY"),
                user_agent: optional_env("USAJOBS_USER_AGENT"),
            },
        })
    }
}

/// Reads an environment variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
