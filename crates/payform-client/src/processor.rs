//! Typed client for the processor's payment-creation endpoint.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `{base_url}/acquiring_payment` | Create payment |
//!
//! Request headers: `Content-Type` and `Accept: application/json`, plus the
//! `sessiontoken` and `applicationkey` credentials. The body is the
//! snake_case [`PaymentRequest`].
//!
//! Exactly one request is sent per call; nothing is retried.

use payform_core::response::DEFAULT_SUCCESS_STATUS;
use payform_core::{PaymentRequest, PaymentResponse, PaymentSuccess};
use reqwest::header::{HeaderMap, ACCEPT};
use serde::Deserialize;

use crate::error::ProcessorError;

/// Path of the payment-creation endpoint, relative to the base URL.
const CREATE_PAYMENT_PATH: &str = "acquiring_payment";

/// Body of a 2xx answer. Every field is optional; ids may be numeric.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProcessorReply {
    transaction_id: Option<serde_json::Value>,
    status: Option<String>,
    message: Option<String>,
    redirect_url: Option<String>,
}

/// Client for the processor API.
#[derive(Debug, Clone)]
pub struct ProcessorClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: HeaderMap,
}

impl ProcessorClient {
    pub(crate) fn new(http: reqwest::Client, base_url: &str, credentials: HeaderMap) -> Self {
        let endpoint = format!("{}/{CREATE_PAYMENT_PATH}", base_url.trim_end_matches('/'));
        Self {
            http,
            endpoint,
            credentials,
        }
    }

    /// Full URL payments are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create a payment. Every failure becomes a failure response.
    ///
    /// Calls `POST {base_url}/acquiring_payment`.
    pub async fn create_payment(&self, req: &PaymentRequest) -> PaymentResponse {
        match self.try_create_payment(req).await {
            Ok(success) => {
                tracing::info!(
                    transaction_id = success.transaction_id.as_deref().unwrap_or_default(),
                    status = %success.status,
                    "payment accepted"
                );
                PaymentResponse::Success(success)
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, "payment failed: {e}");
                PaymentResponse::failure(e.to_string())
            }
        }
    }

    /// Create a payment, keeping the failure reason typed.
    pub async fn try_create_payment(
        &self,
        req: &PaymentRequest,
    ) -> Result<PaymentSuccess, ProcessorError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            merchant = %req.merchant_identifier,
            amount = %req.amount,
            currency = %req.currency,
            card = %req.masked_card_number(),
            "posting payment"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .headers(self.credentials.clone())
            .header(ACCEPT, "application/json")
            .json(req)
            .send()
            .await
            .map_err(ProcessorError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            // An unreadable error body counts as empty.
            let body = resp.text().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }

        let body = resp.text().await.map_err(ProcessorError::Transport)?;
        let reply: ProcessorReply =
            serde_json::from_str(&body).map_err(ProcessorError::MalformedBody)?;

        Ok(PaymentSuccess {
            transaction_id: reply.transaction_id.and_then(id_to_string),
            status: non_empty(reply.status)
                .unwrap_or_else(|| DEFAULT_SUCCESS_STATUS.to_string()),
            message: reply.message,
            redirect_url: reply.redirect_url,
        })
    }
}

fn rejection(status: u16, body: &str) -> ProcessorError {
    ProcessorError::Rejected {
        status,
        message: error_message(body),
    }
}

/// `message` from an error body, if the body is JSON and carries a
/// non-empty string there. Unparsable bodies count as empty.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn id_to_string(id: serde_json::Value) -> Option<String> {
    match id {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
