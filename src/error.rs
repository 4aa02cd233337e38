/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used across the crate
pub type AppResult<T> = Result<T, AppError>;

/// Main error type for the library
#[derive(Debug, Error)]
pub enum AppError {
    /// A column the schema declares is absent from the upstream data.
    /// The API shape changed and processing must stop.
    #[error("schema error: column `{column}` missing from `{schema}` data")]
    Schema {
        /// Name of the schema in use
        schema: String,
        /// Column that could not be found
        column: String,
    },
    /// A response did not contain the expected ISS block
    #[error("missing block `{0}` in response")]
    MissingBlock(String),
    /// Network failure reported by the HTTP client
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// JSON decoding failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// IO failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Retries exhausted on a throttled or failing endpoint
    #[error("rate limit exceeded")]
    RateLimitExceeded,
    /// The requested resource does not exist
    #[error("not found")]
    NotFound,
    /// Unexpected HTTP status
    #[error("unexpected error: {0}")]
    Unexpected(StatusCode),
    /// Caller supplied an invalid argument
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Rendering of the report failed
    #[error("render error: {0}")]
    Render(String),
}

impl AppError {
    /// Builds a schema error for `column` in `schema`
    pub fn schema(schema: impl Into<String>, column: impl Into<String>) -> Self {
        AppError::Schema {
            schema: schema.into(),
            column: column.into(),
        }
    }
}

/// Non-fatal reasons for dropping a single raw row.
///
/// These never propagate as errors; they are logged and the surrounding
/// processing carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// A coupon row with an unparseable date or a non-numeric amount
    #[error("malformed coupon ({field} = {value}): {reason}")]
    MalformedCoupon {
        /// Offending field
        field: String,
        /// Raw value as received
        value: String,
        /// Why the value was rejected
        reason: String,
    },
    /// A row whose identifier was not requested
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),
}
