/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/
use crate::application::interfaces::bonds::{BondDataService, MAX_SECURITIES_PER_REQUEST};
use crate::error::{AppError, AppResult};
use crate::model::coupon::{CouponEvent, coupons_from_table};
use crate::model::report::{self, MonthLabels, ReportRow};
use crate::model::responses::{DESCRIPTION_KEY_COLUMN, DESCRIPTION_VALUE_COLUMN};
use crate::model::security::{
    Securities, SecurityRecord, SecuritySchema, normalize, normalize_table,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Builds monthly coupon reports from a [`BondDataService`]
///
/// The lookup runs in stages: one bulk securities request per chunk of
/// identifiers, then a description request for every identifier the bulk
/// list did not return, then one coupon schedule request per found bond.
/// Schema errors abort the run; an unavailable description or coupon
/// schedule is logged and the run carries on.
pub struct CouponReportService<T: BondDataService> {
    source: Arc<T>,
}

/// Errors meaning the upstream response shape changed
fn is_shape_error(error: &AppError) -> bool {
    matches!(error, AppError::Schema { .. } | AppError::MissingBlock(_))
}

fn unique_in_order(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

impl<T: BondDataService> CouponReportService<T> {
    /// Creates a new service over `source`
    pub fn new(source: Arc<T>) -> Self {
        Self { source }
    }

    /// Looks up reference data for `ids`
    ///
    /// Records come back in discovery order: bulk list rows first, then
    /// description lookups in request order. Identifiers found nowhere are
    /// simply absent.
    ///
    /// # Errors
    /// `AppError::Schema` or `AppError::MissingBlock` if a response no
    /// longer has the expected shape
    pub async fn lookup_securities(&self, ids: &[String]) -> AppResult<Securities> {
        let ids = unique_in_order(ids);
        let requested: HashSet<String> = ids.iter().cloned().collect();
        let bulk = SecuritySchema::bulk();
        let mut securities = Securities::new();

        for chunk in ids.chunks(MAX_SECURITIES_PER_REQUEST) {
            match self.source.get_securities(chunk).await {
                Ok(table) => securities.merge(normalize_table(&table, &requested, &bulk)?),
                Err(e) if is_shape_error(&e) => return Err(e),
                Err(e) => warn!("Securities list unavailable for {} ids: {}", chunk.len(), e),
            }
        }
        info!("Securities list: {} of {} found", securities.len(), ids.len());

        let description = SecuritySchema::description();
        let missing: Vec<&String> = ids.iter().filter(|id| !securities.contains(id)).collect();
        for id in missing {
            let table = match self.source.get_description(id).await {
                Ok(table) => table,
                Err(e) if is_shape_error(&e) => return Err(e),
                Err(e) => {
                    warn!("Description unavailable for {}: {}", id, e);
                    continue;
                }
            };
            if table.is_empty() {
                info!("{} not found on the exchange", id);
                continue;
            }

            let row = table.pivot(&description.name, DESCRIPTION_KEY_COLUMN, DESCRIPTION_VALUE_COLUMN)?;
            let found = normalize(&[row], &requested, &description)?;
            if found.is_empty() {
                info!("Description of {} names a different security, skipped", id);
            }
            securities.merge(found);
        }

        Ok(securities)
    }

    /// Fetches the coupon schedule of every record
    ///
    /// A record whose schedule cannot be fetched gets no events.
    ///
    /// # Errors
    /// `AppError::Schema` if a coupon block lacks its date or value column
    pub async fn collect_coupons(
        &self,
        securities: Securities,
    ) -> AppResult<Vec<(SecurityRecord, Vec<CouponEvent>)>> {
        let mut collected = Vec::with_capacity(securities.len());

        for record in securities {
            let events = match self.source.get_coupons(&record.id).await {
                Ok(table) => coupons_from_table(&table)?,
                Err(e) if is_shape_error(&e) => return Err(e),
                Err(e) => {
                    warn!("Coupon schedule unavailable for {}: {}", record.id, e);
                    Vec::new()
                }
            };
            debug!("{}: {} coupon events", record.id, events.len());
            collected.push((record, events));
        }

        Ok(collected)
    }

    /// Runs the whole pipeline and returns one row per found bond
    ///
    /// # Errors
    /// Propagates schema errors from the lookup and coupon stages
    pub async fn generate_report(
        &self,
        ids: &[String],
        target_year: i32,
        labels: &MonthLabels,
    ) -> AppResult<Vec<ReportRow>> {
        info!("Stage 1: looking up {} identifiers", ids.len());
        let securities = self.lookup_securities(ids).await?;

        info!("Stage 2: fetching coupon schedules for {} bonds", securities.len());
        let collected = self.collect_coupons(securities).await?;

        info!("Stage 3: aggregating coupons for {}", target_year);
        Ok(report::build_report(&collected, target_year, labels))
    }
}
