//! Preheat and purge endpoint tests.

use pcdn_client::{Error, MAX_URLS_PER_REQUEST};
use pcdn_tests::{create_mock_client, test_urls};
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn assert_no_requests(server: &MockServer) {
    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty(), "unexpected requests: {:?}", requests);
}

// ============================================================================
// Preheat
// ============================================================================

#[tokio::test]
async fn test_preheat_request_shape() {
    let server = MockServer::start().await;
    let urls = vec![
        "http://www.test.com/b".to_string(),
        "http://www.test.com/a".to_string(),
    ];

    Mock::given(method("POST"))
        .and(path("/pcdn/cdm/prefetch"))
        .and(header("authorization", "tok-123"))
        .and(body_json(json!({"Urls": ["http://www.test.com/b", "http://www.test.com/a"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "retcode": "0",
            "retmsg": "ok",
            "data": {"TaskId": "prefetch-1"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_mock_client(&server).expect("Failed to create client");
    let resp = client
        .preheat(&urls, "tok-123")
        .await
        .expect("Failed to preheat");

    assert_eq!(resp.retcode, "0");
    assert_eq!(resp.data.task_id, "prefetch-1");
}

#[tokio::test]
async fn test_preheat_at_limit_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pcdn/cdm/prefetch"))
        .and(body_json(json!({"Urls": test_urls(MAX_URLS_PER_REQUEST)})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"retcode": "0"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_mock_client(&server).expect("Failed to create client");
    let resp = client
        .preheat(&test_urls(MAX_URLS_PER_REQUEST), "tok")
        .await
        .expect("Failed to preheat");

    assert_eq!(resp.data.task_id, "");
}

#[tokio::test]
async fn test_preheat_over_limit_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_mock_client(&server).expect("Failed to create client");
    let result = client
        .preheat(&test_urls(MAX_URLS_PER_REQUEST + 1), "tok")
        .await;

    assert!(matches!(
        result,
        Err(Error::TooManyUrls {
            count: 101,
            max: 100
        })
    ));
    assert_no_requests(&server).await;
}

// ============================================================================
// Purge
// ============================================================================

#[tokio::test]
async fn test_purge_request_shape() {
    let server = MockServer::start().await;
    let urls = vec!["http://bind.example.com/test.now".to_string()];

    Mock::given(method("POST"))
        .and(path("/pcdn/cdm/purge"))
        .and(header("authorization", "tok-123"))
        .and(body_json(json!({
            "Urls": ["http://bind.example.com/test.now"],
            "Type": "file",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "retcode": "0",
            "retmsg": "ok",
            "data": {"TaskId": "purge-7"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_mock_client(&server).expect("Failed to create client");
    let resp = client.purge(&urls, "tok-123").await.expect("Failed to purge");

    assert_eq!(resp.data.task_id, "purge-7");
}

#[tokio::test]
async fn test_purge_over_limit_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_mock_client(&server).expect("Failed to create client");
    let result = client.purge(&test_urls(500), "tok").await;

    assert!(matches!(result, Err(Error::TooManyUrls { count: 500, .. })));
    assert_no_requests(&server).await;
}

#[tokio::test]
async fn test_purge_vendor_failure_on_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pcdn/cdm/purge"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "retcode": "403",
            "retmsg": "token expired",
            "data": null,
        })))
        .mount(&server)
        .await;

    let client = create_mock_client(&server).expect("Failed to create client");
    let resp = client
        .purge(&test_urls(1), "stale")
        .await
        .expect("non-2xx with JSON body should parse");

    assert_eq!(resp.retcode, "403");
    assert_eq!(resp.retmsg, "token expired");
    assert!(resp.data.task_id.is_empty());
}
