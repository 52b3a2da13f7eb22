//! Tests for the best-effort client IP lookup.
//!
//! Every failure mode must degrade to `127.0.0.1`, and the processor
//! credentials must never reach the third-party echo service.

use payform_client::{
    ClientOptions, IpLookupError, PaymentClient, PaymentConfig, SubmissionContext, FALLBACK_IP,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(ip_lookup_url: String) -> PaymentClient {
    let config = PaymentConfig::new("secret-session", "secret-app-key")
        .with_base_url("http://127.0.0.1:1".parse().unwrap());
    let context = SubmissionContext::new(
        "mid-001",
        "https://shop.example/done",
        "https://shop.example/hook",
    );
    let options = ClientOptions {
        ip_lookup_url,
        timeout: None,
    };
    PaymentClient::with_options(config, context, options).unwrap()
}

async fn mount_echo(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("format", "json"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn echo_url(server: &MockServer) -> String {
    format!("{}/?format=json", server.uri())
}

#[tokio::test]
async fn returns_echoed_ip() {
    let server = MockServer::start().await;
    mount_echo(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"ip": "203.0.113.7"})),
    )
    .await;

    let client = test_client(echo_url(&server));
    assert_eq!(client.get_client_ip().await, "203.0.113.7");
}

#[tokio::test]
async fn accepts_ipv6() {
    let server = MockServer::start().await;
    mount_echo(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"ip": "2001:db8::1"})),
    )
    .await;

    assert_eq!(test_client(echo_url(&server)).get_client_ip().await, "2001:db8::1");
}

#[tokio::test]
async fn never_sends_processor_credentials() {
    let server = MockServer::start().await;
    mount_echo(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"ip": "203.0.113.7"})),
    )
    .await;

    test_client(echo_url(&server)).get_client_ip().await;

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("sessiontoken").is_none());
    assert!(received[0].headers.get("applicationkey").is_none());
}

#[tokio::test]
async fn falls_back_on_server_error() {
    let server = MockServer::start().await;
    mount_echo(&server, ResponseTemplate::new(500)).await;

    let client = test_client(echo_url(&server));
    assert_eq!(client.get_client_ip().await, FALLBACK_IP);
}

#[tokio::test]
async fn falls_back_on_malformed_body() {
    let server = MockServer::start().await;
    mount_echo(&server, ResponseTemplate::new(200).set_body_string("203.0.113.7")).await;

    let client = test_client(echo_url(&server));
    assert_eq!(client.get_client_ip().await, "127.0.0.1");
}

#[tokio::test]
async fn falls_back_when_ip_is_missing_or_bogus() {
    for body in [serde_json::json!({}), serde_json::json!({"ip": "not-an-ip"})] {
        let server = MockServer::start().await;
        mount_echo(&server, ResponseTemplate::new(200).set_body_json(body)).await;

        let client = test_client(echo_url(&server));
        assert!(matches!(
            client.ip().lookup().await,
            Err(IpLookupError::Malformed(_))
        ));
    }
}

#[tokio::test]
async fn falls_back_when_unreachable() {
    let client = test_client("http://127.0.0.1:1/?format=json".into());
    assert!(matches!(
        client.ip().lookup().await,
        Err(IpLookupError::Transport(_))
    ));
    assert_eq!(client.get_client_ip().await, FALLBACK_IP);
}

#[tokio::test]
async fn lookup_reports_status() {
    let server = MockServer::start().await;
    mount_echo(&server, ResponseTemplate::new(429)).await;

    let err = test_client(echo_url(&server)).ip().lookup().await.unwrap_err();
    assert!(matches!(err, IpLookupError::Status(429)));
    assert_eq!(err.to_string(), "IP lookup returned HTTP 429");
}
