//! Payment client error types.
//!
//! Only client construction and form misuse surface as `Err` to callers.
//! Processor and IP-lookup failures are folded into a
//! [`PaymentResponse`](payform_core::PaymentResponse) or the fallback IP; the
//! types below carry them until that point and give them their
//! user-facing text.

use payform_core::ConfigErrors;

/// Message used when a transport error carries no text of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Errors building a [`PaymentClient`](crate::PaymentClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Credentials or merchant identifier missing.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigErrors),
    /// A credential cannot be sent as an HTTP header value.
    #[error("invalid characters in {header} header value")]
    InvalidHeader { header: &'static str },
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Why a payment attempt failed after leaving the validator.
///
/// `Display` is the exact `error` text reported in the failure response.
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// Connection, DNS, TLS or transport timeout failure.
    #[error("{}", transport_message(.0))]
    Transport(reqwest::Error),
    /// The processor answered with a non-2xx status.
    #[error("{}", rejection_message(.status, .message))]
    Rejected { status: u16, message: Option<String> },
    /// A 2xx answer whose body is not the expected JSON.
    #[error("{0}")]
    MalformedBody(serde_json::Error),
}

fn transport_message(err: &reqwest::Error) -> String {
    let text = err.to_string();
    if text.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        text
    }
}

fn rejection_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(m) => m.clone(),
        None => format!("HTTP error! status: {status}"),
    }
}

/// Why the client IP lookup fell back to the placeholder.
#[derive(Debug, thiserror::Error)]
pub enum IpLookupError {
    /// The lookup service could not be reached.
    #[error("IP lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The lookup service answered with a non-2xx status.
    #[error("IP lookup returned HTTP {0}")]
    Status(u16),
    /// The answer did not contain a usable `ip`.
    #[error("malformed IP lookup response: {0}")]
    Malformed(String),
}

/// Errors driving a [`PaymentForm`](crate::PaymentForm).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The form already has a submission in flight.
    #[error("a submission is already in flight for this form")]
    InFlight,
    /// `finish` was called without a matching `begin_submit`.
    #[error("no submission is in flight for this form")]
    NotInFlight,
}
