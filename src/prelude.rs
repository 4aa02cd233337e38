//! # Prelude
//!
//! Commonly used types and functions in one import:
//!
//! ```rust
//! use moex_coupons::prelude::*;
//!
//! let labels = MonthLabels::english();
//! assert_eq!(labels.get(0), Some("Jan"));
//! ```

// ============================================================================
// CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the ISS client and the report
pub use crate::application::config::{
    Config, IssApiConfig, OutputFormat, RateLimiterConfig, ReportConfig,
};

/// Library version information
pub use crate::{VERSION, version};

/// Logger setup
pub use crate::utils::logger::setup_logger;

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Error and skip types
pub use crate::error::{AppError, AppResult, SkipReason};

// ============================================================================
// DATA SOURCES AND SERVICES
// ============================================================================

/// Bond data source trait
pub use crate::application::interfaces::bonds::BondDataService;

/// ISS client
pub use crate::application::client::Client;

/// Report pipeline
pub use crate::application::services::CouponReportService;

/// Rate limiter
pub use crate::application::rate_limiter::RateLimiter;

/// Retry configuration
pub use crate::model::retry::RetryConfig;

// ============================================================================
// MODELS AND THE REPORT CORE
// ============================================================================

/// ISS tables
pub use crate::model::responses::{IssTable, RawRow};

/// Security records and the normalizer
pub use crate::model::security::{
    SchemaColumn, Securities, SecurityRecord, SecuritySchema, normalize, normalize_table,
};

/// Coupon events
pub use crate::model::coupon::{CouponEvent, coupons_from_table, parse_coupon_row, parse_coupon_rows};

/// Report rows and aggregation
pub use crate::model::report::{
    MonthLabels, MonthLocale, MonthlyTotal, ReportRow, build_report, build_row,
};

// ============================================================================
// PRESENTATION
// ============================================================================

/// Report rendering
pub use crate::presentation::report::ReportTable;
