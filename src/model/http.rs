/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

use crate::application::config::Config;
use crate::application::rate_limiter::RateLimiter;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use crate::model::retry::RetryConfig;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

/// Rate-limited HTTP client for the ISS API
///
/// Every request waits on the shared rate limiter and is retried on
/// throttling or server errors according to the configured `RetryConfig`.
pub struct HttpClient {
    http_client: Client,
    config: Arc<Config>,
    rate_limiter: Arc<RwLock<RateLimiter>>,
}

impl HttpClient {
    /// Creates a new client from configuration
    ///
    /// # Errors
    /// `AppError::Network` if the underlying HTTP client cannot be built
    pub fn new(config: Config) -> Result<Self, AppError> {
        let config = Arc::new(config);
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.iss.timeout))
            .build()?;
        let rate_limiter = Arc::new(RwLock::new(RateLimiter::new(&config.rate_limiter)));

        Ok(Self {
            http_client,
            config,
            rate_limiter,
        })
    }

    /// Resolves `path` against the configured base URL
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.config.iss.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Makes a GET request and decodes the JSON body
    ///
    /// `iss.meta=off` is always appended so blocks carry only columns and data.
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, AppError> {
        let url = self.url_for(path);
        let mut params = vec![("iss.meta", "off")];
        params.extend_from_slice(query);

        let response = make_http_request(
            &self.http_client,
            self.rate_limiter.clone(),
            Method::GET,
            &url,
            &params,
            &self.config.retry,
        )
        .await?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Sends a request, waiting on the rate limiter and retrying on throttling
///
/// # Arguments
/// * `client` - HTTP client
/// * `rate_limiter` - Shared limiter consulted before every attempt
/// * `method` - HTTP method
/// * `url` - Absolute URL
/// * `query` - Query string parameters
/// * `retry_config` - Retry count and delay for `429` and `5xx` responses
///
/// # Returns
/// The successful response, or
/// * `AppError::RateLimitExceeded` when `429` persists after the last retry
/// * `AppError::NotFound` on `404`
/// * `AppError::Unexpected(status)` on any other failure
pub async fn make_http_request(
    client: &Client,
    rate_limiter: Arc<RwLock<RateLimiter>>,
    method: Method,
    url: &str,
    query: &[(&str, &str)],
    retry_config: &RetryConfig,
) -> Result<Response, AppError> {
    let mut retry_count = 0;
    let max_retries = retry_config.max_retries();
    let delay_secs = retry_config.delay_secs();

    loop {
        {
            let limiter = rate_limiter.read().await;
            limiter.wait().await;
        }

        debug!("{} {}", method, url);
        let response = client
            .request(method.clone(), url)
            .query(query)
            .send()
            .await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            retry_count += 1;
            if max_retries > 0 && retry_count > max_retries {
                error!(
                    "{} {} failed with {} after {} attempts",
                    method, url, status, retry_count
                );
                return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                    AppError::RateLimitExceeded
                } else {
                    AppError::Unexpected(status)
                });
            }
            warn!(
                "{} {} returned {} (attempt {}). Waiting {} seconds before retry...",
                method, url, status, retry_count, delay_secs
            );
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;
            continue;
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            debug!("Not found: {}", url);
            return Err(AppError::NotFound);
        }
        error!("Request failed with status {}: {}", status, body);
        return Err(AppError::Unexpected(status));
    }
}
