mod common;

use std::sync::Arc;
use std::time::Duration;

use common::date;
use serde_json::json;
use truewallet::{DateRange, PageQuery, TransactionSearch, WalletClient, WalletError};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HISTORY: &str = "/user-profile-composite/v1/users/transactions/history";

fn client(server: &MockServer) -> WalletClient {
    WalletClient::with_base_url(&server.uri(), Some("tok".to_string())).unwrap()
}

fn query() -> PageQuery {
    PageQuery::new(DateRange::new(date(2018, 12, 1), date(2018, 12, 2)), 3, 2).kind(Some("transfer"))
}

#[tokio::test]
async fn test_fetch_transactions_sends_filters_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .and(query_param("start_date", "2018-12-01"))
        .and(query_param("end_date", "2018-12-02"))
        .and(query_param("limit", "3"))
        .and(query_param("page", "2"))
        .and(query_param("type", "transfer"))
        .and(query_param_is_missing("action"))
        .and(header("authorization", "tok"))
        .and(header("user-agent", "okhttp/3.8.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "UPC-200",
            "data": {
                "total": 5,
                "total_page": 2,
                "activities": [{
                    "report_id": "r-4",
                    "date_time": "01/12/18 10:30",
                    "amount": "+1,000.00",
                    "sub_title": "081-234-5678",
                    "original_action": "creditor"
                }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server).fetch_transactions(&query()).await.unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.total_page, 2);
    assert_eq!(page.activities.len(), 1);
    assert_eq!(page.activities[0].phone, "081-234-5678");
}

#[tokio::test]
async fn test_token_codes_map_to_token_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"code": "MAS-401", "data": null})))
        .mount(&server)
        .await;

    let err = client(&server).fetch_transactions(&query()).await.unwrap_err();
    assert!(err.is_token_error());
}

#[tokio::test]
async fn test_unknown_code_is_reported_raw() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "UPC-999"})))
        .mount(&server)
        .await;

    match client(&server).fetch_transactions(&query()).await {
        Err(WalletError::Unknown { code }) => assert_eq!(code, "UPC-999"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_failure_is_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server).fetch_transactions(&query()).await.unwrap_err();
    assert!(matches!(err, WalletError::Request(_)));
}

#[tokio::test]
async fn test_missing_token_makes_no_request() {
    let server = MockServer::start().await;
    let client = WalletClient::with_base_url(&server.uri(), None).unwrap();

    let err = client.fetch_transactions(&query()).await.unwrap_err();

    assert!(err.is_token_error());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalidating_token_does_not_touch_in_flight_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .and(header("authorization", "tok"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": "UPC-200", "data": {"total": 0, "total_page": 0, "activities": []}}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(client(&server));
    let in_flight = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.fetch_transactions(&query()).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    client.invalidate_token();

    assert!(in_flight.await.unwrap().is_ok());
    assert!(client.fetch_transactions(&query()).await.unwrap_err().is_token_error());
}

#[tokio::test]
async fn test_search_over_http_with_empty_history() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "UPC-200",
            "data": {"total": 0, "total_page": 0, "activities": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let search = TransactionSearch::new(Arc::new(client(&server)));
    let outcome = search.search("0812345678", &["2018-12-01"]).await.unwrap();

    assert!(outcome.is_empty());
    assert!(outcome.is_complete());
}

#[tokio::test]
async fn test_balance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/profile/balance/tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "200",
            "data": {"currentBalance": "1,234.50"}
        })))
        .mount(&server)
        .await;

    assert_eq!(client(&server).get_balance().await.unwrap(), "1,234.50");
}

#[tokio::test]
async fn test_balance_defaults_to_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/profile/balance/tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "200", "data": {}})))
        .mount(&server)
        .await;

    assert_eq!(client(&server).get_balance().await.unwrap(), "0");
}

#[tokio::test]
async fn test_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/profile/tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "200",
            "data": {
                "mobileNumber": "081-234-5678",
                "fullname": "Somchai Jaidee",
                "currentBalance": "10.00",
                "hasPassword": true,
                "addressList": [{"addressID": 1, "address": "1 Silom", "province": "Bangkok", "postalCode": "10500"}]
            }
        })))
        .mount(&server)
        .await;

    let profile = client(&server).get_profile().await.unwrap();

    assert_eq!(profile.fullname, "Somchai Jaidee");
    assert!(profile.has_password);
    assert_eq!(profile.address_list[0].postal_code, "10500");
}

#[tokio::test]
async fn test_report_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/detail/r-42", HISTORY)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "UPC-200",
            "data": {
                "service_type": "transfer",
                "amount": 100.0,
                "section2": {"column1": {"cell1": {"title": "To", "value": "081-234-5678"}}}
            }
        })))
        .mount(&server)
        .await;

    let report = client(&server).get_report("r-42").await.unwrap();

    assert_eq!(report.service_type, "transfer");
    assert_eq!(report.cells()[0].value, "081-234-5678");
}

#[tokio::test]
async fn test_report_with_expired_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/detail/r-42", HISTORY)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "UPC-400"})))
        .mount(&server)
        .await;

    assert!(client(&server).get_report("r-42").await.unwrap_err().is_token_error());
}
