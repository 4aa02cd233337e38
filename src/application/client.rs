/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/
use crate::application::config::Config;
use crate::application::interfaces::bonds::{BondDataService, MAX_SECURITIES_PER_REQUEST};
use crate::error::AppError;
use crate::model::http::HttpClient;
use crate::model::responses::IssTable;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// ISS client implementing [`BondDataService`]
pub struct Client {
    http_client: Arc<HttpClient>,
}

impl Client {
    /// Creates a client from configuration
    ///
    /// # Errors
    /// `AppError::Network` if the HTTP client cannot be built
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http_client = Arc::new(HttpClient::new(config)?);
        Ok(Self { http_client })
    }
}

#[async_trait]
impl BondDataService for Client {
    async fn get_securities(&self, ids: &[String]) -> Result<IssTable, AppError> {
        if ids.is_empty() {
            return Ok(IssTable::default());
        }
        if ids.len() > MAX_SECURITIES_PER_REQUEST {
            return Err(AppError::InvalidInput(format!(
                "maximum number of securities per request is {MAX_SECURITIES_PER_REQUEST}"
            )));
        }

        info!("Getting securities list for {} identifiers", ids.len());
        let joined = ids.join(",");
        let response = self
            .http_client
            .get_json(
                "engines/stock/markets/bonds/securities.json",
                &[("securities", joined.as_str()), ("iss.only", "securities")],
            )
            .await?;
        let table = IssTable::from_response(&response, "securities")?;
        debug!("Securities list obtained: {} rows", table.len());
        Ok(table)
    }

    async fn get_description(&self, id: &str) -> Result<IssTable, AppError> {
        let path = format!("securities/{id}.json");
        debug!("Getting description for: {}", id);
        let response = self
            .http_client
            .get_json(&path, &[("iss.only", "description")])
            .await?;
        IssTable::from_response(&response, "description")
    }

    async fn get_coupons(&self, id: &str) -> Result<IssTable, AppError> {
        let path = format!("statistics/engines/stock/markets/bonds/bondization/{id}.json");
        debug!("Getting coupon schedule for: {}", id);
        let response = self
            .http_client
            .get_json(&path, &[("iss.only", "coupons"), ("limit", "unlimited")])
            .await?;
        let table = IssTable::from_response(&response, "coupons")?;
        debug!("Coupon schedule obtained for {}: {} rows", id, table.len());
        Ok(table)
    }
}
