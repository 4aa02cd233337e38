//! # MOEX Coupons
//!
//! Bond reference data and monthly coupon reports built on top of the
//! Moscow Exchange Informational & Statistical Server (ISS) API.
//!
//! The crate is split in two layers:
//!
//! * a pure core that turns already decoded ISS data into a report:
//!   [`model::security::normalize`] canonicalises per-instrument attribute rows and
//!   [`model::report::build_report`] buckets coupon payments by month of a target year;
//! * the collaborators around it: a rate-limited, retrying HTTP client for ISS,
//!   the [`application::services::CouponReportService`] orchestrating the
//!   multi-stage fetch, and [`presentation::report::ReportTable`] rendering.
//!
//! ## Usage
//!
//! ```rust
//! use moex_coupons::prelude::*;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let record = SecurityRecord {
//!     id: "X1".to_string(),
//!     display_name: "Bond A".to_string(),
//!     maturity_date: "2026-03-01".to_string(),
//!     face_value: None,
//!     currency_code: None,
//!     coupon_value: Decimal::ZERO,
//! };
//! let coupons = vec![CouponEvent::new(
//!     NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
//!     Decimal::new(3000, 2),
//! )];
//!
//! let rows = build_report(&[(record, coupons)], 2025, &MonthLabels::english());
//! assert_eq!(rows[0].amount_for("Feb"), Some(Decimal::new(3000, 2)));
//! ```

/// Application layer: configuration, rate limiting, ISS client and services
pub mod application;
/// Crate-wide constants
pub mod constants;
/// Error and skip types
pub mod error;
/// Data models and the pure report core
pub mod model;
/// Convenience re-exports
pub mod prelude;
/// Rendering of report rows
pub mod presentation;
/// Environment, logging and parsing helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
