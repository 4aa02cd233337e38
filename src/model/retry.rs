/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_SECS};
use crate::utils::config::get_env_or_none;
use serde::{Deserialize, Serialize};

/// Configuration for HTTP request retry behavior
///
/// Throttled (`429`) and server-side (`5xx`) ISS responses are retried.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retries (None = infinite retries)
    pub max_retry_count: Option<u32>,
    /// Delay in seconds between retries (None = default delay)
    pub retry_delay_secs: Option<u64>,
}

impl RetryConfig {
    /// Creates a retry configuration from `MAX_RETRY_COUNT` and `RETRY_DELAY_SECS`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retries forever with the default delay
    #[must_use]
    pub fn infinite() -> Self {
        Self {
            max_retry_count: None,
            retry_delay_secs: None,
        }
    }

    /// Creates a configuration with both max retries and delay
    #[must_use]
    pub fn with_max_retries_and_delay(max_retries: u32, delay_secs: u64) -> Self {
        Self {
            max_retry_count: Some(max_retries),
            retry_delay_secs: Some(delay_secs),
        }
    }

    /// Maximum retry count (0 = infinite)
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retry_count.unwrap_or(0)
    }

    /// Retry delay in seconds
    #[must_use]
    pub fn delay_secs(&self) -> u64 {
        self.retry_delay_secs.unwrap_or(DEFAULT_RETRY_DELAY_SECS)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        let max_retry_count = get_env_or_none::<u32>("MAX_RETRY_COUNT").unwrap_or(DEFAULT_MAX_RETRIES);
        let retry_delay_secs: Option<u64> = get_env_or_none("RETRY_DELAY_SECS");

        Self {
            // an explicit 0 in the environment means "retry forever"
            max_retry_count: (max_retry_count > 0).then_some(max_retry_count),
            retry_delay_secs,
        }
    }
}
