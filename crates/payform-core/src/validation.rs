//! # Payment Data Validation
//!
//! Client-side checks run on a [`PaymentDraft`] before anything is sent to
//! the processor. Every rule runs independently and all violations are
//! collected, in this order:
//!
//! 1. Required-field presence, in field declaration order.
//! 2. Email shape (`local@domain.tld`).
//! 3. Card number: 13-19 digits after stripping separators, Luhn checksum.
//! 4. Expiry month range and expiry date against today (inclusive of the
//!    current month).
//! 5. CVC: 3 or 4 digits.
//! 6. Amount: parses to a number strictly greater than zero.
//!
//! Format rules only fire for fields that are present; an absent field is
//! reported once, as required.
//!
//! Numeric fields are read the way HTML form values are conventionally read:
//! leading whitespace is skipped and the longest numeric prefix is used, so
//! `"03"` is month 3 and `"5.00 USD"` is an amount of 5.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::field::PaymentField;
use crate::request::PaymentDraft;

/// Minimum card number length, in digits.
pub const MIN_CARD_DIGITS: usize = 13;

/// Maximum card number length, in digits.
pub const MAX_CARD_DIGITS: usize = 19;

/// A single rule violation. `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Violation {
    /// A required field is absent or empty.
    #[error("{0} is required")]
    Required(PaymentField),
    /// The email does not look like `local@domain.tld`.
    #[error("Invalid email format")]
    InvalidEmail,
    /// The card number has the wrong length or fails the Luhn checksum.
    #[error("Invalid credit card number")]
    InvalidCardNumber,
    /// The expiry month is not a number in 1..=12.
    #[error("Invalid expiry month")]
    InvalidExpiryMonth,
    /// The expiry date lies before the current month.
    #[error("Card has expired")]
    CardExpired,
    /// The CVC is not 3 or 4 digits.
    #[error("Invalid CVC code")]
    InvalidCvc,
    /// The amount does not parse to a positive number.
    #[error("Invalid amount")]
    InvalidAmount,
}

impl From<Violation> for String {
    fn from(v: Violation) -> Self {
        v.to_string()
    }
}

/// Outcome of validating a draft: valid iff no violations were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<Violation>,
}

impl ValidationResult {
    fn from_violations(errors: Vec<Violation>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Whether the draft passed every rule.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Violations in report order.
    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    /// Consume the result, keeping the violations.
    pub fn into_errors(self) -> Vec<Violation> {
        self.errors
    }

    /// User-facing messages in report order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// All messages joined with `", "`, the single-string form reported to
    /// callers when a submission is rejected.
    pub fn summary(&self) -> String {
        self.messages().join(", ")
    }
}

/// Validate a draft against today's date (UTC).
pub fn validate_payment_data(draft: &PaymentDraft) -> ValidationResult {
    validate_payment_data_at(draft, Utc::now().date_naive())
}

/// Validate a draft against an explicit "today", used for the expiry check.
pub fn validate_payment_data_at(draft: &PaymentDraft, today: NaiveDate) -> ValidationResult {
    let mut errors: Vec<Violation> = draft
        .missing_required()
        .into_iter()
        .map(Violation::Required)
        .collect();

    if let Some(email) = draft.present(PaymentField::Email) {
        if !is_valid_email(email) {
            errors.push(Violation::InvalidEmail);
        }
    }

    if let Some(ccn) = draft.present(PaymentField::Ccn) {
        if !is_valid_card_number(ccn) {
            errors.push(Violation::InvalidCardNumber);
        }
    }

    if let (Some(month), Some(year)) = (
        draft.present(PaymentField::ExpMonth),
        draft.present(PaymentField::ExpYear),
    ) {
        errors.extend(check_expiry(month, year, today));
    }

    if let Some(cvc) = draft.present(PaymentField::CvcCode) {
        if !is_valid_cvc(cvc) {
            errors.push(Violation::InvalidCvc);
        }
    }

    if let Some(amount) = draft.present(PaymentField::Amount) {
        if !is_valid_amount(amount) {
            errors.push(Violation::InvalidAmount);
        }
    }

    ValidationResult::from_violations(errors)
}

/// `local@domain.tld`: no whitespace anywhere, exactly one `@` with a
/// non-empty local part, and a dot inside the domain with at least one
/// character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Card number check: separators are ignored, 13-19 digits must remain and
/// pass the Luhn checksum.
pub fn is_valid_card_number(ccn: &str) -> bool {
    let digits: String = ccn.chars().filter(char::is_ascii_digit).collect();
    (MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&digits.len()) && luhn_checksum_valid(&digits)
}

/// Luhn checksum over a string of ASCII digits. Non-digits make it fail.
///
/// Reading right to left, every second digit is doubled (minus 9 when the
/// result exceeds 9); the number is valid when the total is divisible by 10.
pub fn luhn_checksum_valid(digits: &str) -> bool {
    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut d) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}

/// Exactly 3 or 4 ASCII digits.
pub fn is_valid_cvc(cvc: &str) -> bool {
    (3..=4).contains(&cvc.len()) && cvc.bytes().all(|b| b.is_ascii_digit())
}

/// The amount's numeric prefix parses to a number strictly above zero.
pub fn is_valid_amount(amount: &str) -> bool {
    parse_float_prefix(amount).is_some_and(|v| v > 0.0)
}

fn check_expiry(month: &str, year: &str, today: NaiveDate) -> Vec<Violation> {
    let mut errors = Vec::new();
    let month = parse_int_prefix(month);
    let year = parse_int_prefix(year);

    if !month.is_some_and(|m| (1..=12).contains(&m)) {
        errors.push(Violation::InvalidExpiryMonth);
    }

    let current_year = i64::from(today.year());
    let current_month = i64::from(today.month());
    // An unreadable year is not before anything.
    let expired = match year {
        None => false,
        Some(y) => {
            y < current_year || (y == current_year && month.is_some_and(|m| m < current_month))
        }
    };
    if expired {
        errors.push(Violation::CardExpired);
    }
    errors
}

/// Longest leading base-10 integer, after optional whitespace and sign.
/// Prefixes beyond the `i64` range saturate.
pub(crate) fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    match s[..sign_len + digits_len].parse() {
        Ok(v) => Some(v),
        // Only overflow remains once the prefix is all digits.
        Err(_) if s.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Longest leading decimal number (with optional fraction and exponent),
/// after optional whitespace and sign. `Infinity` is accepted.
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['+', '-']));

    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse().ok();
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
