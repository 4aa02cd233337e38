/// Module containing environment variable helpers
pub mod config;
/// Module containing logging utilities
pub mod logger;
/// Module containing parsing utilities for raw ISS values
pub mod parsing;

pub use config::*;
pub use logger::*;
pub use parsing::*;
