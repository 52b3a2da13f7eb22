//! # payform-client -- Typed HTTP client for card-payment submission
//!
//! Drives one payment attempt end to end:
//!
//! 1. Resolve the client IP via a public IP-echo service (best effort,
//!    falls back to `127.0.0.1`).
//! 2. Merge the caller's [`SubmissionContext`], the user's form values and
//!    the IP into one draft.
//! 3. Validate locally; a rejected draft never reaches the network.
//! 4. `POST {base_url}/acquiring_payment` exactly once.
//!
//! Every outcome, including transport failures, comes back as a
//! [`PaymentResponse`]; `submit` never returns an error. Only building the
//! client can fail, when the configuration check does.
//!
//! ## Collaborator boundary
//!
//! A UI drives three operations: [`validate_payment_data`],
//! [`ProcessorClient::create_payment`] and [`IpLookupClient::client_ip`],
//! or the composed [`PaymentClient::submit`]. [`PaymentForm`] holds the
//! form-side state (values, displayed errors, in-flight flag).

pub mod error;
pub mod form;
pub mod ip;
pub mod processor;

pub use error::{ClientError, FormError, IpLookupError, ProcessorError};
pub use form::PaymentForm;
pub use ip::{IpLookupClient, DEFAULT_IP_LOOKUP_URL, FALLBACK_IP};
pub use payform_core::{
    check_configuration, validate_payment_data, PaymentConfig, PaymentDraft, PaymentField,
    PaymentRequest, PaymentResponse, Submission, SubmissionContext, SubmissionPhase,
};
pub use processor::ProcessorClient;

use std::time::Duration;

use payform_core::validation::ValidationResult;
use reqwest::header::{HeaderMap, HeaderValue};

/// Transport settings that are not part of the processor configuration.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// IP-echo endpoint. Default: [`DEFAULT_IP_LOOKUP_URL`].
    pub ip_lookup_url: String,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_string(),
            timeout: None,
        }
    }
}

/// Payment client for one merchant context. Holds sub-clients for the
/// processor and the IP lookup.
#[derive(Debug, Clone)]
pub struct PaymentClient {
    context: SubmissionContext,
    processor: ProcessorClient,
    ip: IpLookupClient,
}

impl PaymentClient {
    /// Build a client with default transport options.
    ///
    /// Fails if the application key, session token or merchant identifier
    /// is empty.
    pub fn new(config: PaymentConfig, context: SubmissionContext) -> Result<Self, ClientError> {
        Self::with_options(config, context, ClientOptions::default())
    }

    /// Build a client with explicit transport options.
    pub fn with_options(
        config: PaymentConfig,
        context: SubmissionContext,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        check_configuration(&config, &context.merchant_identifier)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Build)?;

        let credentials = credential_headers(&config)?;

        Ok(Self {
            processor: ProcessorClient::new(http.clone(), config.effective_base_url(), credentials),
            ip: IpLookupClient::new(http, options.ip_lookup_url),
            context,
        })
    }

    /// The merchant context merged into every request.
    pub fn context(&self) -> &SubmissionContext {
        &self.context
    }

    /// Access the processor client.
    pub fn processor(&self) -> &ProcessorClient {
        &self.processor
    }

    /// Access the IP lookup client.
    pub fn ip(&self) -> &IpLookupClient {
        &self.ip
    }

    /// The caller's public IP, or `127.0.0.1`.
    pub async fn get_client_ip(&self) -> String {
        self.ip.client_ip().await
    }

    /// Post an already assembled request. See [`ProcessorClient::create_payment`].
    pub async fn create_payment(&self, req: &PaymentRequest) -> PaymentResponse {
        self.processor.create_payment(req).await
    }

    /// Validate a draft against today's date.
    pub fn validate(&self, draft: &PaymentDraft) -> ValidationResult {
        validate_payment_data(draft)
    }

    /// Submit user-entered form values and return the outcome.
    pub async fn submit(&self, form_values: &PaymentDraft) -> PaymentResponse {
        let submission = self.submit_tracked(form_values).await;
        match submission.into_response() {
            Some(resp) => resp,
            None => PaymentResponse::failure(error::UNKNOWN_ERROR),
        }
    }

    /// Submit user-entered form values and return the terminal
    /// [`Submission`], including violations when rejected.
    pub async fn submit_tracked(&self, form_values: &PaymentDraft) -> Submission {
        let mut submission = Submission::new();
        if let Err(e) = self.drive(&mut submission, form_values).await {
            tracing::error!("submission state machine violated: {e}");
        }
        submission
    }

    async fn drive(
        &self,
        submission: &mut Submission,
        form_values: &PaymentDraft,
    ) -> Result<(), payform_core::SubmissionError> {
        let ip = self.get_client_ip().await;

        let mut draft = self.context.to_draft();
        draft.merge(form_values);
        draft.set(PaymentField::Ip, ip);

        submission.begin_validation()?;
        submission.apply_validation(validate_payment_data(&draft))?;
        if submission.phase() == SubmissionPhase::Rejected {
            tracing::info!(
                merchant = %self.context.merchant_identifier,
                violations = submission.violations().len(),
                "payment rejected by local validation"
            );
            return Ok(());
        }

        let response = match PaymentRequest::try_from(draft) {
            Ok(req) => self.processor.create_payment(&req).await,
            // Validation already checked presence; kept as a failure, not a panic.
            Err(e) => PaymentResponse::failure(e.to_string()),
        };
        submission.complete(response)
    }
}

fn credential_headers(config: &PaymentConfig) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    for (name, value) in [
        ("sessiontoken", config.session_token.as_str()),
        ("applicationkey", config.application_key.as_str()),
    ] {
        let mut value =
            HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader { header: name })?;
        value.set_sensitive(true);
        headers.insert(name, value);
    }
    Ok(headers)
}
