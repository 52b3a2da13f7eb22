//! Processor access configuration.
//!
//! [`PaymentConfig`] carries the credentials the processor expects on every
//! payment request and an optional base URL override. It is injected by the
//! embedding application and scoped to one client; there is no process-wide
//! default instance.

use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::error::{ConfigErrors, ConfigIssue, EnvConfigError};

/// Processor endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://dev1.blockchanger.io";

/// Credentials and endpoint for the payment processor.
///
/// Custom `Debug` implementation redacts both credentials.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfig {
    /// Sent as the `sessiontoken` header.
    #[serde(default)]
    pub session_token: Zeroizing<String>,
    /// Sent as the `applicationkey` header.
    #[serde(default)]
    pub application_key: Zeroizing<String>,
    /// Processor base URL. [`DEFAULT_BASE_URL`] when absent.
    #[serde(default)]
    pub base_url: Option<Url>,
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("session_token", &"[REDACTED]")
            .field("application_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PaymentConfig {
    /// Configuration for the default processor endpoint.
    pub fn new(session_token: impl Into<String>, application_key: impl Into<String>) -> Self {
        Self {
            session_token: Zeroizing::new(session_token.into()),
            application_key: Zeroizing::new(application_key.into()),
            base_url: None,
        }
    }

    /// Point the configuration at a different processor endpoint.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// The configured base URL, or [`DEFAULT_BASE_URL`].
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_ref().map_or(DEFAULT_BASE_URL, Url::as_str)
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PAYFORM_SESSION_TOKEN` (required)
    /// - `PAYFORM_APPLICATION_KEY` (required)
    /// - `PAYFORM_BASE_URL` (default: [`DEFAULT_BASE_URL`])
    pub fn from_env() -> Result<Self, EnvConfigError> {
        let session_token = std::env::var("PAYFORM_SESSION_TOKEN")
            .map_err(|_| EnvConfigError::MissingVar("PAYFORM_SESSION_TOKEN"))?;
        let application_key = std::env::var("PAYFORM_APPLICATION_KEY")
            .map_err(|_| EnvConfigError::MissingVar("PAYFORM_APPLICATION_KEY"))?;
        let base_url = match std::env::var("PAYFORM_BASE_URL") {
            Ok(raw) => Some(
                Url::parse(&raw)
                    .map_err(|e| EnvConfigError::InvalidUrl("PAYFORM_BASE_URL", e.to_string()))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            session_token: Zeroizing::new(session_token),
            application_key: Zeroizing::new(application_key),
            base_url,
        })
    }
}

/// Check that a form can submit at all with this configuration.
///
/// Reports, in order, a missing application key, session token, and merchant
/// identifier. This is a precondition independent of payment-data
/// validation.
pub fn check_configuration(
    config: &PaymentConfig,
    merchant_identifier: &str,
) -> Result<(), ConfigErrors> {
    let mut issues = Vec::new();
    if config.application_key.is_empty() {
        issues.push(ConfigIssue::MissingApplicationKey);
    }
    if config.session_token.is_empty() {
        issues.push(ConfigIssue::MissingSessionToken);
    }
    if merchant_identifier.is_empty() {
        issues.push(ConfigIssue::MissingMerchantId);
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ConfigErrors(issues))
    }
}
