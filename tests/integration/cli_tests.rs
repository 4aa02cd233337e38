use crate::common::{coupon_row, coupons_body, securities_body};
use mockito::Matcher;
use serde_json::json;
use std::process::Command;

#[test]
fn coupon_report_binary_prints_csv() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/engines/stock/markets/bonds/securities.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(securities_body(json!([
            ["SU26238RMFS4", "TQOB", "ОФЗ 26238", "2041-05-15", 1000, "SUR", 35.4],
        ])))
        .create();
    server
        .mock("GET", "/statistics/engines/stock/markets/bonds/bondization/SU26238RMFS4.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(coupons_body(json!([
            coupon_row("SU26238RMFS4", "2025-05-21", json!(35.4)),
            coupon_row("SU26238RMFS4", "2025-11-19", json!(35.4)),
        ])))
        .create();

    let output = Command::new(env!("CARGO_BIN_EXE_coupon-report"))
        .env("MOEX_ISS_BASE_URL", server.url())
        .env("MOEX_RATE_LIMIT_MAX_REQUESTS", "1000")
        .env("MOEX_RATE_LIMIT_BURST_SIZE", "100")
        .env("MAX_RETRY_COUNT", "1")
        .env("RETRY_DELAY_SECS", "0")
        .env("REPORT_ISINS", "SU26238RMFS4")
        .env("REPORT_YEAR", "2025")
        .env("REPORT_MONTH_LABELS", "en")
        .env("REPORT_FORMAT", "csv")
        .env("LOGLEVEL", "ERROR")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("NAME,MATURITY,Jan"));
    assert_eq!(
        lines[1],
        "ОФЗ 26238,2041-05-15,0.00,0.00,0.00,0.00,35.40,0.00,0.00,0.00,0.00,0.00,35.40,0.00,70.80"
    );
}

#[test]
fn coupon_report_binary_fails_on_schema_error() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/engines/stock/markets/bonds/securities.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({"securities": {"columns": ["SECID", "SECNAME"], "data": [["SU26238RMFS4", "ОФЗ 26238"]]}})
                .to_string(),
        )
        .create();

    let output = Command::new(env!("CARGO_BIN_EXE_coupon-report"))
        .env("MOEX_ISS_BASE_URL", server.url())
        .env("MOEX_RATE_LIMIT_MAX_REQUESTS", "1000")
        .env("MOEX_RATE_LIMIT_BURST_SIZE", "100")
        .env("MAX_RETRY_COUNT", "1")
        .env("RETRY_DELAY_SECS", "0")
        .env("REPORT_ISINS", "SU26238RMFS4")
        .env("REPORT_FORMAT", "csv")
        .env("LOGLEVEL", "ERROR")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
