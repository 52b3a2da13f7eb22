#![deny(missing_docs)]

//! # payform-core -- Card-Payment Data Model and Validation
//!
//! Everything a payment form needs before it touches the network:
//!
//! - [`PaymentDraft`] / [`PaymentRequest`]: the editable form values and the
//!   complete processor payload, keyed by [`PaymentField`].
//! - [`validate_payment_data`]: client-side checks (required fields, email,
//!   Luhn card number, expiry, CVC, amount), reporting every violation.
//! - [`PaymentConfig`] and [`check_configuration`]: processor credentials and
//!   the precondition that a form can submit at all.
//! - [`SubmissionContext`]: merchant identity and routing URLs merged into
//!   every request.
//! - [`Submission`]: the per-attempt state machine, and [`PaymentResponse`],
//!   its uniform outcome.
//!
//! No I/O happens here; the HTTP side lives in `payform-client`.

pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod request;
pub mod response;
pub mod submission;
pub mod validation;

pub use config::{check_configuration, PaymentConfig, DEFAULT_BASE_URL};
pub use context::SubmissionContext;
pub use error::{ConfigErrors, ConfigIssue, ConversionError, EnvConfigError, SubmissionError};
pub use field::PaymentField;
pub use request::{PaymentDraft, PaymentRequest};
pub use response::{PaymentFailure, PaymentResponse, PaymentSuccess};
pub use submission::{Submission, SubmissionPhase};
pub use validation::{
    is_valid_card_number, luhn_checksum_valid, validate_payment_data, validate_payment_data_at,
    ValidationResult, Violation,
};
