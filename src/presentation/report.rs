use crate::constants::NOT_AVAILABLE;
use crate::error::{AppError, AppResult};
use crate::model::report::{MonthLabels, ReportRow};
use prettytable::{Cell, Row, Table, format};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::io::Write;

const NAME_HEADER: &str = "NAME";
const MATURITY_HEADER: &str = "MATURITY";
const TOTAL_HEADER: &str = "TOTAL";

fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Tabular view over report rows
///
/// Columns: name, maturity date, one column per month bucket and the
/// yearly total. Rows keep the order they were built in. A row lacking a
/// bucket of the header shows `N/A` in that column.
pub struct ReportTable<'a> {
    rows: &'a [ReportRow],
    labels: &'a MonthLabels,
}

impl<'a> ReportTable<'a> {
    /// Creates a view over `rows`; `labels` heads the month columns of an empty report
    pub fn new(rows: &'a [ReportRow], labels: &'a MonthLabels) -> Self {
        Self { rows, labels }
    }

    /// Month labels of the columns
    ///
    /// Taken from the first row's buckets, so the header always names the
    /// buckets the rows were built with; `labels` only covers an empty report.
    fn month_labels(&self) -> Vec<String> {
        match self.rows.first() {
            Some(row) => row
                .monthly_totals
                .iter()
                .map(|bucket| bucket.label.clone())
                .collect(),
            None => self.labels.iter().map(String::from).collect(),
        }
    }

    fn header(months: &[String]) -> Vec<String> {
        let mut header = vec![NAME_HEADER.to_string(), MATURITY_HEADER.to_string()];
        header.extend(months.iter().cloned());
        header.push(TOTAL_HEADER.to_string());
        header
    }

    fn cells(row: &ReportRow, months: &[String]) -> Vec<String> {
        let mut cells = vec![row.display_name.clone(), row.maturity_date.clone()];
        cells.extend(months.iter().map(|label| {
            row.amount_for(label)
                .map_or_else(|| NOT_AVAILABLE.to_string(), format_amount)
        }));
        cells.push(format_amount(row.total()));
        cells
    }

    /// Builds the `prettytable` table, header included
    #[must_use]
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let months = self.month_labels();
        table.add_row(Row::new(
            Self::header(&months).iter().map(|title| Cell::new(title)).collect(),
        ));
        for row in self.rows {
            table.add_row(Row::new(
                Self::cells(row, &months)
                    .iter()
                    .map(|cell| Cell::new(cell))
                    .collect(),
            ));
        }
        table
    }

    /// Writes the table as CSV, header first
    ///
    /// # Errors
    /// `AppError::Render` if writing fails
    pub fn to_csv<W: Write>(&self, writer: W) -> AppResult<()> {
        self.to_table()
            .to_csv(writer)
            .map(|_| ())
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

impl fmt::Display for ReportTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}
