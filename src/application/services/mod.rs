/// Module containing the coupon report service
pub mod report_service;

pub use report_service::*;
