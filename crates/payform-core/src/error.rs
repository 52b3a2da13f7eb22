//! # Error Types
//!
//! Structured errors for the payform data model, built with `thiserror`.
//!
//! Payment-data validation failures are *not* errors in this sense: they
//! are reported as a [`ValidationResult`](crate::ValidationResult) so that
//! every violation reaches the caller at once.

use thiserror::Error;

use crate::field::PaymentField;
use crate::submission::SubmissionPhase;

/// A string did not name any [`PaymentField`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown payment field: \"{0}\"")]
pub struct UnknownFieldError(pub String);

/// A draft could not be converted into a complete payment request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// One or more required fields are absent or empty.
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<PaymentField>),
}

fn join_fields(fields: &[PaymentField]) -> String {
    fields
        .iter()
        .map(PaymentField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single reason why the processor configuration cannot be used.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssue {
    /// The application key is empty.
    #[error("Application Key is required")]
    MissingApplicationKey,
    /// The session token is empty.
    #[error("Session Token is required")]
    MissingSessionToken,
    /// The merchant identifier is empty.
    #[error("Merchant ID is required")]
    MissingMerchantId,
}

/// All configuration issues found by
/// [`check_configuration`](crate::config::check_configuration), in report order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_issues(.0))]
pub struct ConfigErrors(pub Vec<ConfigIssue>);

impl ConfigErrors {
    /// The issues, in report order.
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.0
    }

    /// Human-readable messages, one per issue.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors loading a [`PaymentConfig`](crate::PaymentConfig) from the environment.
#[derive(Error, Debug)]
pub enum EnvConfigError {
    /// A required environment variable is unset.
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    /// A URL-valued variable does not parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(&'static str, String),
}

/// Errors driving a [`Submission`](crate::Submission) through its phases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The attempted transition is not allowed from the current phase.
    #[error("invalid submission transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// Current phase.
        from: SubmissionPhase,
        /// Attempted target phase.
        to: SubmissionPhase,
    },
}
