use crate::error::{AppResult, SkipReason};
use crate::model::responses::{IssTable, RawRow};
use crate::utils::parsing::{NULL, parse_iss_date, value_to_decimal};
use chrono::{Datelike, NaiveDate};
use pretty_simple_display::DisplaySimple;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Payment date column of the `coupons` block
pub const COUPON_DATE_COLUMN: &str = "coupondate";
/// Payment amount column of the `coupons` block
pub const COUPON_VALUE_COLUMN: &str = "value";

/// A single scheduled coupon payment
#[derive(Debug, Clone, Copy, DisplaySimple, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CouponEvent {
    /// Payment date
    pub payment_date: NaiveDate,
    /// Amount paid per bond, never negative
    pub amount: Decimal,
}

impl CouponEvent {
    /// Creates a coupon event
    pub fn new(payment_date: NaiveDate, amount: Decimal) -> Self {
        Self {
            payment_date,
            amount,
        }
    }

    /// Calendar year of the payment
    #[must_use]
    pub fn year(&self) -> i32 {
        self.payment_date.year()
    }

    /// Zero based month index of the payment (January = 0)
    #[must_use]
    pub fn month0(&self) -> usize {
        self.payment_date.month0() as usize
    }
}

/// Parses one raw coupon row
///
/// A `null` or missing amount is a zero amount, not a malformed row.
///
/// # Errors
/// `SkipReason::MalformedCoupon` if the date is missing or not a calendar
/// date, or the amount is not a non-negative number.
pub fn parse_coupon_row(row: &RawRow) -> Result<CouponEvent, SkipReason> {
    let raw_date = row.get(COUPON_DATE_COLUMN).unwrap_or(&NULL);
    let payment_date = raw_date
        .as_str()
        .and_then(parse_iss_date)
        .ok_or_else(|| SkipReason::MalformedCoupon {
            field: COUPON_DATE_COLUMN.to_string(),
            value: raw_date.to_string(),
            reason: "not a YYYY-MM-DD calendar date".to_string(),
        })?;

    let raw_amount = row.get(COUPON_VALUE_COLUMN).unwrap_or(&NULL);
    let amount = value_to_decimal(raw_amount)
        .map_err(|reason| SkipReason::MalformedCoupon {
            field: COUPON_VALUE_COLUMN.to_string(),
            value: raw_amount.to_string(),
            reason,
        })?
        .unwrap_or(Decimal::ZERO);

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(SkipReason::MalformedCoupon {
            field: COUPON_VALUE_COLUMN.to_string(),
            value: raw_amount.to_string(),
            reason: "negative amount".to_string(),
        });
    }

    Ok(CouponEvent::new(payment_date, amount))
}

/// Parses raw coupon rows, dropping malformed ones
///
/// Each dropped row is logged; the remaining rows keep their order.
pub fn parse_coupon_rows(rows: &[RawRow]) -> Vec<CouponEvent> {
    rows.iter()
        .filter_map(|row| match parse_coupon_row(row) {
            Ok(event) => Some(event),
            Err(reason) => {
                warn!("Skipping coupon row: {}", reason);
                None
            }
        })
        .collect()
}

/// Parses the `coupons` block of a bondization response
///
/// # Errors
/// `AppError::Schema` if the block lacks the date or value column
pub fn coupons_from_table(table: &IssTable) -> AppResult<Vec<CouponEvent>> {
    table.require_columns("coupons", &[COUPON_DATE_COLUMN, COUPON_VALUE_COLUMN])?;
    Ok(parse_coupon_rows(&table.rows()))
}
