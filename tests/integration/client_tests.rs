use crate::common::{coupon_row, coupons_body, description_body, securities_body, test_config};
use mockito::Matcher;
use moex_coupons::application::client::Client;
use moex_coupons::application::interfaces::bonds::BondDataService;
use moex_coupons::error::AppError;
use serde_json::{Value, json};

#[tokio::test]
async fn get_securities_decodes_table_and_sends_ids() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/engines/stock/markets/bonds/securities.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("securities".into(), "SU26238RMFS4,RU000A106HB4".into()),
            Matcher::UrlEncoded("iss.meta".into(), "off".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(securities_body(json!([
            ["SU26238RMFS4", "TQOB", "ОФЗ 26238", "2041-05-15", 1000, "SUR", 35.4],
        ])))
        .create_async()
        .await;

    let client = Client::new(test_config(&server.url())).unwrap();
    let table = client
        .get_securities(&["SU26238RMFS4".to_string(), "RU000A106HB4".to_string()])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(table.len(), 1);
    assert_eq!(table.column_index("SECNAME"), Some(2));
    assert_eq!(table.data[0][0], json!("SU26238RMFS4"));
}

#[tokio::test]
async fn get_securities_empty_returns_default() {
    let client = Client::new(test_config("http://127.0.0.1:9")).unwrap();
    let table = client.get_securities(&[]).await.expect("should be Ok for empty");
    assert!(table.is_empty());
}

#[tokio::test]
async fn get_securities_more_than_limit_returns_error() {
    let client = Client::new(test_config("http://127.0.0.1:9")).unwrap();
    let ids: Vec<String> = (0..51).map(|i| format!("ID{i}")).collect();
    let err = client.get_securities(&ids).await.err().expect("should be Err");
    match err {
        AppError::InvalidInput(msg) => assert!(msg.contains("maximum number of securities")),
        other => panic!("Unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn get_description_decodes_block() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/securities/RU000A106HB4.json")
        .match_query(Matcher::UrlEncoded("iss.only".into(), "description".into()))
        .with_status(200)
        .with_body(description_body(json!([
            ["SECID", "Код ценной бумаги", "RU000A106HB4", "string", 1, 0, null],
            ["NAME", "Полное наименование", "Облигация", "string", 2, 0, null],
        ])))
        .create_async()
        .await;

    let client = Client::new(test_config(&server.url())).unwrap();
    let table = client.get_description("RU000A106HB4").await.unwrap();
    let row = table.pivot("description", "name", "value").unwrap();
    assert_eq!(row["NAME"], json!("Облигация"));
}

#[tokio::test]
async fn get_coupons_without_block_is_missing_block() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/statistics/engines/stock/markets/bonds/bondization/A.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "amortizations": { "columns": [], "data": [] } }).to_string())
        .create_async()
        .await;

    let client = Client::new(test_config(&server.url())).unwrap();
    let err = client.get_coupons("A").await.unwrap_err();
    assert!(matches!(err, AppError::MissingBlock(ref block) if block == "coupons"));
}

#[tokio::test]
async fn get_coupons_requests_full_schedule() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/statistics/engines/stock/markets/bonds/bondization/A.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("iss.only".into(), "coupons".into()),
            Matcher::UrlEncoded("limit".into(), "unlimited".into()),
        ]))
        .with_status(200)
        .with_body(coupons_body(json!([
            coupon_row("A", "2025-03-01", json!(41.14)),
            coupon_row("A", "2025-09-01", Value::Null),
        ])))
        .create_async()
        .await;

    let client = Client::new(test_config(&server.url())).unwrap();
    let table = client.get_coupons("A").await.unwrap();
    mock.assert_async().await;
    assert_eq!(table.len(), 2);
}

#[tokio::test]
async fn not_found_maps_to_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/securities/NOPE.json")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let client = Client::new(test_config(&server.url())).unwrap();
    let err = client.get_description("NOPE").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn server_errors_are_retried_then_reported() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/securities/A.json")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(2)
        .create_async()
        .await;

    let client = Client::new(test_config(&server.url())).unwrap();
    let err = client.get_description("A").await.unwrap_err();
    mock.assert_async().await;
    assert!(matches!(err, AppError::Unexpected(status) if status.as_u16() == 503));
}

#[tokio::test]
async fn throttling_is_retried_then_rate_limit_exceeded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/securities/A.json")
        .match_query(Matcher::Any)
        .with_status(429)
        .expect(2)
        .create_async()
        .await;

    let client = Client::new(test_config(&server.url())).unwrap();
    let err = client.get_description("A").await.unwrap_err();
    mock.assert_async().await;
    assert!(matches!(err, AppError::RateLimitExceeded));
}
