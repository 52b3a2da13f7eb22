//! # Validate Subcommand
//!
//! Runs the local validator over a draft file and prints every violation,
//! in report order.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use payform_core::{validate_payment_data, ValidationResult};

use crate::EXIT_FAILURE;

/// Arguments for the `payform validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Draft JSON file with snake_case field names.
    #[arg(value_name = "DRAFT")]
    pub draft: PathBuf,

    /// Print the result as JSON (`{"isValid": .., "errors": [..]}`).
    #[arg(long)]
    pub json: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if the draft is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let draft = crate::load_draft(&args.draft)?;
    let result = validate_payment_data(&draft);

    tracing::info!(
        draft = %args.draft.display(),
        violations = result.errors().len(),
        "validated draft"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(if result.is_valid() { 0 } else { EXIT_FAILURE })
}

fn print_report(result: &ValidationResult) {
    if result.is_valid() {
        println!("OK: draft is valid");
        return;
    }
    for message in result.messages() {
        println!("  FAIL: {message}");
    }
    println!("\n{} violation(s).", result.errors().len());
}
