//! # payform-cli -- Command-line harness for the payment form
//!
//! Exercises the library outside a UI, with the same sample data a
//! developer would type into the form.
//!
//! ## Subcommands
//!
//! - `payform validate <draft.json>`: run the local validator.
//! - `payform ip`: resolve the client IP the way a submission does.
//! - `payform submit <draft.json> --merchant-id …`: submit a payment.
//!
//! Drafts are JSON objects keyed by the snake_case field names
//! (`first_name`, `ccn`, `exp_month`, …). Unknown keys are rejected.
//!
//! Exit codes: 0 on success, 1 on a rejected or failed payment, 2 on a
//! configuration error.

pub mod ip;
pub mod submit;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use payform_core::PaymentDraft;

/// Exit code for an invalid draft or a failed payment.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for missing credentials or merchant identifier.
pub const EXIT_CONFIG: u8 = 2;

/// Read a draft from a JSON file.
pub fn load_draft(path: &Path) -> Result<PaymentDraft> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse draft {}", path.display()))
}
