/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

//! Monthly coupon aggregation
//!
//! [`build_report`] is a pure function: it buckets each record's coupon
//! payments by month of one target year and returns one [`ReportRow`] per
//! record, in input order.

use crate::constants::MONTHS_IN_YEAR;
use crate::error::{AppError, AppResult};
use crate::model::coupon::CouponEvent;
use crate::model::security::SecurityRecord;
use pretty_simple_display::DisplaySimple;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

const ENGLISH_MONTHS: [&str; MONTHS_IN_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const RUSSIAN_MONTHS: [&str; MONTHS_IN_YEAR] = [
    "Янв", "Фев", "Мар", "Апр", "Май", "Июн", "Июл", "Авг", "Сен", "Окт", "Ноя", "Дек",
];

/// The twelve column labels of a report, January first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthLabels(Vec<String>);

impl MonthLabels {
    /// Builds labels from exactly twelve distinct strings
    ///
    /// # Errors
    /// `AppError::InvalidInput` on a wrong count or a repeated label
    pub fn new<S: AsRef<str>>(labels: &[S]) -> AppResult<Self> {
        if labels.len() != MONTHS_IN_YEAR {
            return Err(AppError::InvalidInput(format!(
                "expected {} month labels, got {}",
                MONTHS_IN_YEAR,
                labels.len()
            )));
        }
        let mut seen = HashSet::new();
        for label in labels {
            if !seen.insert(label.as_ref()) {
                return Err(AppError::InvalidInput(format!(
                    "duplicate month label: {}",
                    label.as_ref()
                )));
            }
        }
        Ok(Self(labels.iter().map(|l| l.as_ref().to_string()).collect()))
    }

    /// `Jan` .. `Dec`
    #[must_use]
    pub fn english() -> Self {
        Self(ENGLISH_MONTHS.iter().map(|l| l.to_string()).collect())
    }

    /// `Янв` .. `Дек`
    #[must_use]
    pub fn russian() -> Self {
        Self(RUSSIAN_MONTHS.iter().map(|l| l.to_string()).collect())
    }

    /// Label of the zero based month
    #[must_use]
    pub fn get(&self, month0: usize) -> Option<&str> {
        self.0.get(month0).map(String::as_str)
    }

    /// Iterates the labels in month order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Built-in label sets
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MonthLocale {
    /// English abbreviations
    English,
    /// Russian abbreviations
    #[default]
    Russian,
}

impl MonthLocale {
    /// Labels for this locale
    #[must_use]
    pub fn labels(self) -> MonthLabels {
        match self {
            MonthLocale::English => MonthLabels::english(),
            MonthLocale::Russian => MonthLabels::russian(),
        }
    }
}

impl FromStr for MonthLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(MonthLocale::English),
            "ru" | "russian" => Ok(MonthLocale::Russian),
            other => Err(format!("unknown month locale: {other}")),
        }
    }
}

/// Coupon total of one monthly bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyTotal {
    /// Column label of the month
    pub label: String,
    /// Sum of the coupon amounts paid in the month
    pub amount: Decimal,
}

/// One line of the monthly coupon report
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRow {
    /// Instrument identifier
    pub id: String,
    /// Human readable name
    pub display_name: String,
    /// Maturity date as `YYYY-MM-DD`, or `N/A`
    pub maturity_date: String,
    /// Twelve buckets in label order
    pub monthly_totals: Vec<MonthlyTotal>,
}

impl ReportRow {
    /// Amount of the bucket labelled `label`
    #[must_use]
    pub fn amount_for(&self, label: &str) -> Option<Decimal> {
        self.monthly_totals
            .iter()
            .find(|bucket| bucket.label == label)
            .map(|bucket| bucket.amount)
    }

    /// Bucket amounts in month order
    pub fn amounts(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.monthly_totals.iter().map(|bucket| bucket.amount)
    }

    /// Sum over all twelve buckets, saturating at `Decimal::MAX`
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.amounts()
            .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
    }
}

impl fmt::Display for MonthlyTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.label, self.amount)
    }
}

/// Aggregates one record's coupons into a report row
///
/// Events outside `target_year` are ignored. A bucket that would exceed
/// the `Decimal` range saturates at `Decimal::MAX`.
#[must_use]
pub fn build_row(
    record: &SecurityRecord,
    events: &[CouponEvent],
    target_year: i32,
    labels: &MonthLabels,
) -> ReportRow {
    let mut buckets = [Decimal::ZERO; MONTHS_IN_YEAR];
    for event in events.iter().filter(|event| event.year() == target_year) {
        let bucket = &mut buckets[event.month0()];
        *bucket = bucket.saturating_add(event.amount);
    }

    ReportRow {
        id: record.id.clone(),
        display_name: record.display_name.clone(),
        maturity_date: record.maturity_date.clone(),
        monthly_totals: labels
            .iter()
            .zip(buckets)
            .map(|(label, amount)| MonthlyTotal {
                label: label.to_string(),
                amount,
            })
            .collect(),
    }
}

/// Builds the monthly coupon report
///
/// Returns one row per input record, in input order, each holding the
/// per-month coupon sums of `target_year`.
#[must_use]
pub fn build_report(
    records: &[(SecurityRecord, Vec<CouponEvent>)],
    target_year: i32,
    labels: &MonthLabels,
) -> Vec<ReportRow> {
    records
        .iter()
        .map(|(record, events)| build_row(record, events, target_year, labels))
        .collect()
}
