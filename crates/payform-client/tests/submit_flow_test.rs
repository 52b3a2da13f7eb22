//! End-to-end submission tests: IP lookup, merge with the merchant context,
//! local validation, then a single POST to the processor.

use payform_client::{
    ClientError, ClientOptions, FormError, PaymentClient, PaymentConfig, PaymentDraft,
    PaymentField, PaymentForm, SubmissionContext, SubmissionPhase,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context() -> SubmissionContext {
    let mut ctx = SubmissionContext::new(
        "mid-001",
        "https://shop.example/done",
        "https://shop.example/hook",
    );
    ctx.amount = Some("25.00".into());
    ctx.param = Some("order-42".into());
    ctx
}

fn test_client(server: &MockServer) -> PaymentClient {
    let config = PaymentConfig::new("test-session", "test-app-key")
        .with_base_url(server.uri().parse().unwrap());
    let options = ClientOptions {
        ip_lookup_url: format!("{}/ip?format=json", server.uri()),
        timeout: None,
    };
    PaymentClient::with_options(config, context(), options).unwrap()
}

async fn mount_ip(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ip": "198.51.100.9"})),
        )
        .mount(server)
        .await;
}

/// Values a cardholder types in. Merchant, URLs, amount and currency come
/// from the context.
fn cardholder_values() -> PaymentDraft {
    PaymentDraft::default()
        .with(PaymentField::FirstName, "Jane")
        .with(PaymentField::LastName, "Doe")
        .with(PaymentField::Email, "jane@example.com")
        .with(PaymentField::PhoneNumber, "+15555550100")
        .with(PaymentField::Ccn, "4412 3972 1208 0000")
        .with(PaymentField::ExpMonth, "03")
        .with(PaymentField::ExpYear, "2099")
        .with(PaymentField::CvcCode, "003")
        .with(PaymentField::Address, "1 Congress Ave")
        .with(PaymentField::City, "Austin")
        .with(PaymentField::State, "TX")
        .with(PaymentField::Country, "US")
        .with(PaymentField::Region, "South")
        .with(PaymentField::ZipCode, "73301")
}

#[tokio::test]
async fn submit_merges_context_and_ip() {
    let server = MockServer::start().await;
    mount_ip(&server).await;

    Mock::given(method("POST"))
        .and(path("/acquiring_payment"))
        .and(body_partial_json(serde_json::json!({
            "merchant_identifier": "mid-001",
            "redirect_url": "https://shop.example/done",
            "postback_url": "https://shop.example/hook",
            "amount": "25.00",
            "currency": "USD",
            "param": "order-42",
            "payment_status": "approved",
            "ip": "198.51.100.9",
            "first_name": "Jane"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transaction_id": "txn_1",
            "status": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = test_client(&server).submit(&cardholder_values()).await;
    assert!(resp.is_success(), "unexpected failure: {:?}", resp.error());
    assert_eq!(resp.transaction_id(), Some("txn_1"));
}

#[tokio::test]
async fn form_values_override_context() {
    let server = MockServer::start().await;
    mount_ip(&server).await;

    Mock::given(method("POST"))
        .and(path("/acquiring_payment"))
        .and(body_partial_json(serde_json::json!({
            "amount": "99.95",
            "currency": "EUR"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let values = cardholder_values()
        .with(PaymentField::Amount, "99.95")
        .with(PaymentField::Currency, "EUR");
    let resp = test_client(&server).submit(&values).await;
    assert!(resp.is_success());
}

#[tokio::test]
async fn invalid_values_never_reach_the_processor() {
    let server = MockServer::start().await;
    mount_ip(&server).await;

    Mock::given(method("POST"))
        .and(path("/acquiring_payment"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let values = cardholder_values()
        .with(PaymentField::Ccn, "4412397212080001")
        .with(PaymentField::CvcCode, "12");
    let submission = test_client(&server).submit_tracked(&values).await;

    assert_eq!(submission.phase(), SubmissionPhase::Rejected);
    let resp = submission.response().unwrap();
    assert_eq!(resp.status(), "error");
    assert_eq!(
        resp.error(),
        Some("Invalid credit card number, Invalid CVC code")
    );
}

#[tokio::test]
async fn processor_failure_is_tracked_as_failed() {
    let server = MockServer::start().await;
    mount_ip(&server).await;

    Mock::given(method("POST"))
        .and(path("/acquiring_payment"))
        .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
            "message": "Insufficient funds"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let submission = test_client(&server)
        .submit_tracked(&cardholder_values())
        .await;
    assert_eq!(submission.phase(), SubmissionPhase::Failed);
    assert!(submission.violations().is_empty());
    assert_eq!(
        submission.response().and_then(|r| r.error()),
        Some("Insufficient funds")
    );
}

#[tokio::test]
async fn ip_lookup_failure_still_submits_with_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/acquiring_payment"))
        .and(body_partial_json(serde_json::json!({"ip": "127.0.0.1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transaction_id": "txn_fallback"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = test_client(&server).submit(&cardholder_values()).await;
    assert_eq!(resp.transaction_id(), Some("txn_fallback"));
}

#[test]
fn construction_reports_every_config_issue_in_order() {
    let ctx = SubmissionContext::new("", "r", "p");
    let err = PaymentClient::new(PaymentConfig::new("", ""), ctx).unwrap_err();
    match err {
        ClientError::Config(errs) => assert_eq!(
            errs.messages(),
            vec![
                "Application Key is required",
                "Session Token is required",
                "Merchant ID is required",
            ]
        ),
        other => panic!("expected Config error, got: {other:?}"),
    }
}

// ── PaymentForm ──────────────────────────────────────────────────────

#[tokio::test]
async fn form_submit_records_violations_then_clears_on_edit() {
    let server = MockServer::start().await;
    mount_ip(&server).await;
    let client = test_client(&server);

    let mut form = PaymentForm::new(client.context());
    form.set_field(PaymentField::FirstName, "Jane");
    form.set_field(PaymentField::Email, "jane-at-example");

    let resp = form.submit(&client).await.unwrap();
    assert!(!resp.is_success());
    assert!(!form.is_submitting());
    assert!(form.errors().contains(&"last_name is required".to_string()));
    assert!(form.errors().contains(&"Invalid email format".to_string()));

    form.set_field(PaymentField::Email, "jane@example.com");
    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn form_submit_succeeds_and_guards_reentry() {
    let server = MockServer::start().await;
    mount_ip(&server).await;
    Mock::given(method("POST"))
        .and(path("/acquiring_payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transaction_id": "txn_form",
            "redirect_url": "https://pay.example/3ds"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = test_client(&server);

    let mut form = PaymentForm::new(client.context());
    for field in PaymentField::ALL {
        if let Some(v) = cardholder_values().get(field) {
            form.set_field(field, v);
        }
    }

    let values = form.begin_submit().unwrap();
    assert_eq!(form.begin_submit().unwrap_err(), FormError::InFlight);

    let submission = client.submit_tracked(&values).await;
    let resp = form.finish(submission).unwrap();
    assert_eq!(resp.transaction_id(), Some("txn_form"));
    assert_eq!(resp.redirect_url(), Some("https://pay.example/3ds"));
    assert!(form.errors().is_empty());
    assert!(!form.is_submitting());
}
