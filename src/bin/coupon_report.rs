use moex_coupons::prelude::*;
use std::error::Error;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logger();

    let config = Config::new();
    info!("=== MOEX Coupon Report v{} ===", version());
    info!(
        "{} bonds, year {}, base URL {}",
        config.report.isins.len(),
        config.report.target_year,
        config.iss.base_url
    );

    let report = config.report.clone();
    let labels = report.month_locale.labels();
    let client = Client::new(config)?;
    let service = CouponReportService::new(Arc::new(client));

    let timer = Instant::now();
    let rows = match service
        .generate_report(&report.isins, report.target_year, &labels)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            error!("Report failed: {}", e);
            return Err(e.into());
        }
    };
    info!(
        "Report built: {} of {} bonds in {:?}",
        rows.len(),
        report.isins.len(),
        timer.elapsed()
    );

    let table = ReportTable::new(&rows, &labels);
    match report.format {
        OutputFormat::Table => println!("{table}"),
        OutputFormat::Csv => table.to_csv(std::io::stdout().lock())?,
    }

    Ok(())
}
