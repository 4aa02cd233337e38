use moex_coupons::application::config::{Config, RateLimiterConfig};
use moex_coupons::model::retry::RetryConfig;
use serde_json::{Value, json};

/// Configuration pointed at a mock server, without pacing delays
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::new().with_base_url(base_url);
    config.rate_limiter = RateLimiterConfig {
        max_requests: 1000,
        period_seconds: 1,
        burst_size: 100,
    };
    config.retry = RetryConfig::with_max_retries_and_delay(1, 0);
    config
}

pub fn securities_body(rows: Value) -> String {
    json!({
        "securities": {
            "columns": ["SECID", "BOARDID", "SECNAME", "MATDATE", "FACEVALUE", "CURRENCYID", "COUPONVALUE"],
            "data": rows,
        }
    })
    .to_string()
}

pub fn description_body(rows: Value) -> String {
    json!({
        "description": {
            "columns": ["name", "title", "value", "type", "sort_order", "is_hidden", "precision"],
            "data": rows,
        }
    })
    .to_string()
}

pub fn coupons_body(rows: Value) -> String {
    json!({
        "coupons": {
            "columns": ["isin", "name", "issuevalue", "coupondate", "recorddate", "startdate", "initialfacevalue", "facevalue", "faceunit", "value", "valueprc", "value_rub", "secid", "primary_boardid"],
            "data": rows,
        }
    })
    .to_string()
}

pub fn coupon_row(secid: &str, date: &str, value: Value) -> Value {
    json!([secid, "Bond", 1000000, date, date, "2020-01-01", 1000, 1000, "RUB", value, 7.5, value, secid, "TQOB"])
}
