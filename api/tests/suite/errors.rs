use jsonboard_api::ApiError;
use jsonboard_types::PostId;
use reqwest::StatusCode;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::client_for;

#[tokio::test]
async fn not_found_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server, 2)
        .posts()
        .get_by_id(PostId::new(999))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        ApiError::Status { path, body, .. } => {
            assert_eq!(path, "/posts/999");
            assert_eq!(body, "{}");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_are_retried_per_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let err = client_for(&server, 1).posts().get_all().await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn long_error_bodies_are_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(400).set_body_string("x".repeat(10_000)))
        .mount(&server)
        .await;

    let err = client_for(&server, 0).posts().get_all().await.unwrap_err();

    let ApiError::Status { body, .. } = err else {
        panic!("expected Status");
    };
    assert!(body.ends_with("...(truncated)"));
    assert!(body.len() < 10_000);
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server, 0).posts().get_all().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { ref path, .. } if path == "/posts"));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let client = jsonboard_api::ApiClient::new(
        "http://127.0.0.1:9",
        std::time::Duration::from_secs(2),
        jsonboard_api::retry::RetryConfig::default().with_max_retries(0),
    )
    .unwrap();

    let err = client.posts().get_all().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }));
}
