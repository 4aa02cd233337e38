use crate::error::AppError;
use crate::model::responses::IssTable;
use async_trait::async_trait;

/// Maximum number of identifiers accepted by one bulk securities request
pub const MAX_SECURITIES_PER_REQUEST: usize = 50;

/// Source of raw bond data
///
/// Each method returns one ISS block as an [`IssTable`]; decoding into domain
/// types is left to the normalizer and the coupon parser.
#[async_trait]
pub trait BondDataService: Send + Sync {
    /// Gets the bulk `securities` block for up to
    /// [`MAX_SECURITIES_PER_REQUEST`] identifiers
    ///
    /// The response may contain rows for identifiers that were not asked for.
    async fn get_securities(&self, ids: &[String]) -> Result<IssTable, AppError>;

    /// Gets the per-instrument `description` block
    ///
    /// An unknown identifier yields an empty table.
    async fn get_description(&self, id: &str) -> Result<IssTable, AppError>;

    /// Gets the `coupons` block of the instrument's bondization schedule
    async fn get_coupons(&self, id: &str) -> Result<IssTable, AppError>;
}
