//! # Payment Response
//!
//! The uniform outcome of a submission attempt. In Rust it is a sum type,
//! so a response cannot carry both a transaction id and an error. On the
//! wire (and towards the embedding UI) it is the flat object
//!
//! ```json
//! { "success": true, "transaction_id": "txn_1", "status": "success" }
//! { "success": false, "error": "Invalid amount", "status": "error" }
//! ```

use serde::{Deserialize, Serialize};

/// Status reported for every failed attempt.
pub const ERROR_STATUS: &str = "error";

/// Status reported for a successful attempt when the processor omits one.
pub const DEFAULT_SUCCESS_STATUS: &str = "success";

/// Outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireResponse", try_from = "WireResponse")]
pub enum PaymentResponse {
    /// The processor accepted the payment.
    Success(PaymentSuccess),
    /// Validation, the processor, or the network rejected the attempt.
    Failure(PaymentFailure),
}

/// Details of an accepted payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSuccess {
    /// Processor-assigned transaction identifier, if returned.
    pub transaction_id: Option<String>,
    /// Processor status, `"success"` when the processor sent none.
    pub status: String,
    /// Optional processor message.
    pub message: Option<String>,
    /// Where the cardholder should be sent next, if anywhere.
    pub redirect_url: Option<String>,
}

/// Details of a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentFailure {
    /// Human-readable reason.
    pub error: String,
}

impl PaymentResponse {
    /// A failed outcome with the given message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(PaymentFailure {
            error: error.into(),
        })
    }

    /// Whether the processor accepted the payment.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The status string: the processor's on success, `"error"` on failure.
    pub fn status(&self) -> &str {
        match self {
            Self::Success(s) => &s.status,
            Self::Failure(_) => ERROR_STATUS,
        }
    }

    /// Transaction identifier of an accepted payment.
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            Self::Success(s) => s.transaction_id.as_deref(),
            Self::Failure(_) => None,
        }
    }

    /// Redirect target of an accepted payment.
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Success(s) => s.redirect_url.as_deref(),
            Self::Failure(_) => None,
        }
    }

    /// Error message of a failed attempt.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(f) => Some(&f.error),
        }
    }
}

/// Flat JSON shape shared with the embedding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireResponse {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    redirect_url: Option<String>,
}

impl From<PaymentResponse> for WireResponse {
    fn from(resp: PaymentResponse) -> Self {
        match resp {
            PaymentResponse::Success(s) => Self {
                success: true,
                transaction_id: s.transaction_id,
                status: Some(s.status),
                message: s.message,
                error: None,
                redirect_url: s.redirect_url,
            },
            PaymentResponse::Failure(f) => Self {
                success: false,
                transaction_id: None,
                status: Some(ERROR_STATUS.to_string()),
                message: None,
                error: Some(f.error),
                redirect_url: None,
            },
        }
    }
}

impl TryFrom<WireResponse> for PaymentResponse {
    type Error = String;

    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        if wire.success {
            if wire.error.is_some() {
                return Err("successful response must not carry an error".to_string());
            }
            Ok(Self::Success(PaymentSuccess {
                transaction_id: wire.transaction_id,
                status: wire
                    .status
                    .unwrap_or_else(|| DEFAULT_SUCCESS_STATUS.to_string()),
                message: wire.message,
                redirect_url: wire.redirect_url,
            }))
        } else {
            if wire.transaction_id.is_some() {
                return Err("failed response must not carry a transaction_id".to_string());
            }
            Ok(Self::failure(wire.error.unwrap_or_default()))
        }
    }
}
