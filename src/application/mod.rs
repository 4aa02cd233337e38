/// ISS client implementation
pub mod client;
/// Application configuration module
pub mod config;
/// Module containing service interfaces and traits
pub mod interfaces;
/// Rate limiter module for API request throttling
pub mod rate_limiter;
/// Report services built on top of the data source interfaces
pub mod services;
