use crate::constants::{DEFAULT_ISINS, DEFAULT_ISS_BASE_URL, DEFAULT_ISS_TIMEOUT_SECS};
use crate::model::report::MonthLocale;
use crate::model::retry::RetryConfig;
use crate::utils::config::{get_env_list, get_env_or_default};
use chrono::{Datelike, Local};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the ISS client and the coupon report
pub struct Config {
    /// ISS REST API configuration
    pub iss: IssApiConfig,
    /// Rate limiter configuration for API requests
    pub rate_limiter: RateLimiterConfig,
    /// Retry behaviour on throttled or failing requests
    pub retry: RetryConfig,
    /// What the report covers and how it is printed
    pub report: ReportConfig,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the ISS REST API
pub struct IssApiConfig {
    /// Base URL of the ISS API
    pub base_url: String,
    /// Timeout in seconds for ISS requests
    pub timeout: u64,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for rate limiting API requests
pub struct RateLimiterConfig {
    /// Maximum number of requests allowed per period
    pub max_requests: u32,
    /// Time period in seconds for the rate limit
    pub period_seconds: u64,
    /// Burst size - maximum number of requests that can be made at once
    pub burst_size: u32,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Scope and output of the coupon report
pub struct ReportConfig {
    /// Bond identifiers to report on, in the order they are requested
    pub isins: Vec<String>,
    /// Calendar year whose coupons are aggregated
    pub target_year: i32,
    /// Month label set used for the report columns
    pub month_locale: MonthLocale,
    /// Output format of the report binary
    pub format: OutputFormat,
}

/// How the report binary prints the report
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    /// Box-drawn text table
    #[default]
    Table,
    /// Comma separated values
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the environment
    ///
    /// A `.env` file in the working directory is loaded first when present.
    /// Unset or unparseable variables fall back to their defaults.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let isins = get_env_list("REPORT_ISINS")
            .unwrap_or_else(|| DEFAULT_ISINS.iter().map(|isin| isin.to_string()).collect());

        Config {
            iss: IssApiConfig {
                base_url: get_env_or_default(
                    "MOEX_ISS_BASE_URL",
                    String::from(DEFAULT_ISS_BASE_URL),
                ),
                timeout: get_env_or_default("MOEX_ISS_TIMEOUT", DEFAULT_ISS_TIMEOUT_SECS),
            },
            rate_limiter: RateLimiterConfig {
                max_requests: get_env_or_default("MOEX_RATE_LIMIT_MAX_REQUESTS", 2),
                period_seconds: get_env_or_default("MOEX_RATE_LIMIT_PERIOD_SECONDS", 1),
                burst_size: get_env_or_default("MOEX_RATE_LIMIT_BURST_SIZE", 1),
            },
            retry: RetryConfig::default(),
            report: ReportConfig {
                isins,
                target_year: get_env_or_default("REPORT_YEAR", Local::now().year()),
                month_locale: get_env_or_default("REPORT_MONTH_LABELS", MonthLocale::Russian),
                format: get_env_or_default("REPORT_FORMAT", OutputFormat::Table),
            },
        }
    }

    /// Returns the configuration pointed at another ISS base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.iss.base_url = base_url.into();
        self
    }
}
