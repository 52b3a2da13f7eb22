//! # Submit Subcommand
//!
//! Submits a draft through the full flow: IP lookup, merge with the
//! merchant context, local validation, then one POST to the processor.
//!
//! Credentials come from the environment (`PAYFORM_SESSION_TOKEN`,
//! `PAYFORM_APPLICATION_KEY`, optional `PAYFORM_BASE_URL`). The
//! `PaymentResponse` is printed as JSON on stdout.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use payform_client::{
    ClientError, ClientOptions, PaymentClient, PaymentConfig, SubmissionContext,
};
use url::Url;

use crate::{EXIT_CONFIG, EXIT_FAILURE};

/// Arguments for the `payform submit` subcommand.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Draft JSON file with the cardholder's values.
    #[arg(value_name = "DRAFT")]
    pub draft: PathBuf,

    /// Merchant identifier issued by the processor.
    #[arg(long)]
    pub merchant_id: String,

    /// Browser redirect target after the payment.
    #[arg(long)]
    pub redirect_url: String,

    /// Processor callback for the final transaction status.
    #[arg(long)]
    pub postback_url: String,

    /// Pre-filled amount; a value in the draft wins.
    #[arg(long)]
    pub amount: Option<String>,

    /// Currency code (default USD).
    #[arg(long)]
    pub currency: Option<String>,

    /// Payment description (default "Payment").
    #[arg(long)]
    pub description: Option<String>,

    /// Statement descriptor (default "Payment").
    #[arg(long)]
    pub descriptor: Option<String>,

    /// Pass-through value echoed back by the processor.
    #[arg(long)]
    pub param: Option<String>,

    /// Requested payment status (default "approved").
    #[arg(long)]
    pub payment_status: Option<String>,

    /// Processor base URL; overrides PAYFORM_BASE_URL.
    #[arg(long)]
    pub base_url: Option<Url>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl SubmitArgs {
    fn context(&self) -> SubmissionContext {
        SubmissionContext {
            amount: self.amount.clone(),
            currency: self.currency.clone(),
            description: self.description.clone(),
            descriptor: self.descriptor.clone(),
            param: self.param.clone(),
            payment_status: self.payment_status.clone(),
            ..SubmissionContext::new(&self.merchant_id, &self.redirect_url, &self.postback_url)
        }
    }
}

/// Execute the submit subcommand.
///
/// Returns exit code: 0 on success, 1 on a rejected or failed payment, 2 on a
/// configuration error.
pub async fn run_submit(args: &SubmitArgs) -> Result<u8> {
    let draft = crate::load_draft(&args.draft)?;

    let mut config = match PaymentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return Ok(EXIT_CONFIG);
        }
    };
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.clone());
    }

    let options = ClientOptions {
        timeout: args.timeout_secs.map(std::time::Duration::from_secs),
        ..ClientOptions::default()
    };
    let client = match PaymentClient::with_options(config, args.context(), options) {
        Ok(client) => client,
        Err(ClientError::Config(errs)) => {
            for message in errs.messages() {
                eprintln!("configuration error: {message}");
            }
            return Ok(EXIT_CONFIG);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        merchant = %client.context().merchant_identifier,
        endpoint = %client.processor().endpoint(),
        "submitting payment"
    );

    let response = client.submit(&draft).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(if response.is_success() { 0 } else { EXIT_FAILURE })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use payform_core::PaymentField;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        submit: SubmitArgs,
    }

    #[test]
    fn context_applies_defaults_and_overrides() {
        let harness = Harness::parse_from([
            "payform",
            "draft.json",
            "--merchant-id",
            "mid-1",
            "--redirect-url",
            "https://demo.io/",
            "--postback-url",
            "https://hook.example/pb",
            "--currency",
            "EUR",
        ]);
        let draft = harness.submit.context().to_draft();
        assert_eq!(draft.get(PaymentField::MerchantIdentifier), Some("mid-1"));
        assert_eq!(draft.get(PaymentField::Currency), Some("EUR"));
        assert_eq!(draft.get(PaymentField::Description), Some("Payment"));
        assert_eq!(draft.get(PaymentField::PaymentStatus), Some("approved"));
    }

    #[test]
    fn base_url_must_parse() {
        let parsed = Harness::try_parse_from([
            "payform",
            "draft.json",
            "--merchant-id",
            "mid-1",
            "--redirect-url",
            "r",
            "--postback-url",
            "p",
            "--base-url",
            "not a url",
        ]);
        assert!(parsed.is_err());
    }
}
