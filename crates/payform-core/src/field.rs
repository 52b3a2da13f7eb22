//! # Payment Fields
//!
//! One variant per field of the processor's `acquiring_payment` payload.
//! The wire name of each field is its snake_case form, exactly as the
//! processor expects it in the JSON body.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownFieldError;

/// A single field of a payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentField {
    /// Opaque merchant identifier issued by the processor.
    MerchantIdentifier,
    /// ISO-4217-like currency code, e.g. `USD`.
    Currency,
    /// Card number.
    Ccn,
    /// Card expiry month (1-12).
    ExpMonth,
    /// Card expiry year.
    ExpYear,
    /// Card verification code.
    CvcCode,
    /// Cardholder email address.
    Email,
    /// Cardholder phone number.
    PhoneNumber,
    /// Client IP, resolved at submit time.
    Ip,
    /// Cardholder first name.
    FirstName,
    /// Cardholder last name.
    LastName,
    /// Decimal amount string.
    Amount,
    /// Billing city.
    City,
    /// Billing state.
    State,
    /// Billing country code.
    Country,
    /// Billing region.
    Region,
    /// Billing postal code.
    ZipCode,
    /// Billing street address.
    Address,
    /// Browser redirect target after the payment.
    RedirectUrl,
    /// Endpoint the processor calls with the final transaction status.
    PostbackUrl,
    /// Free-text payment description.
    Description,
    /// Statement descriptor shown to the cardholder.
    Descriptor,
    /// Free-form pass-through value, returned untouched by the processor.
    Param,
    /// Caller-asserted payment status.
    PaymentStatus,
}

impl PaymentField {
    /// Every field, in payload declaration order.
    pub const ALL: [PaymentField; 24] = [
        Self::MerchantIdentifier,
        Self::Currency,
        Self::Ccn,
        Self::ExpMonth,
        Self::ExpYear,
        Self::CvcCode,
        Self::Email,
        Self::PhoneNumber,
        Self::Ip,
        Self::FirstName,
        Self::LastName,
        Self::Amount,
        Self::City,
        Self::State,
        Self::Country,
        Self::Region,
        Self::ZipCode,
        Self::Address,
        Self::RedirectUrl,
        Self::PostbackUrl,
        Self::Description,
        Self::Descriptor,
        Self::Param,
        Self::PaymentStatus,
    ];

    /// Fields that must be present and non-empty before submission, in the
    /// order their "is required" messages are reported.
    pub const REQUIRED: [PaymentField; 22] = [
        Self::MerchantIdentifier,
        Self::Currency,
        Self::Ccn,
        Self::ExpMonth,
        Self::ExpYear,
        Self::CvcCode,
        Self::Email,
        Self::PhoneNumber,
        Self::Ip,
        Self::FirstName,
        Self::LastName,
        Self::Amount,
        Self::City,
        Self::State,
        Self::Country,
        Self::Region,
        Self::ZipCode,
        Self::Address,
        Self::RedirectUrl,
        Self::PostbackUrl,
        Self::Description,
        Self::Descriptor,
    ];

    /// The snake_case wire name of this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MerchantIdentifier => "merchant_identifier",
            Self::Currency => "currency",
            Self::Ccn => "ccn",
            Self::ExpMonth => "exp_month",
            Self::ExpYear => "exp_year",
            Self::CvcCode => "cvc_code",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Ip => "ip",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Amount => "amount",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::Region => "region",
            Self::ZipCode => "zip_code",
            Self::Address => "address",
            Self::RedirectUrl => "redirect_url",
            Self::PostbackUrl => "postback_url",
            Self::Description => "description",
            Self::Descriptor => "descriptor",
            Self::Param => "param",
            Self::PaymentStatus => "payment_status",
        }
    }

    /// Whether the field must be present for a submission to be valid.
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Param | Self::PaymentStatus)
    }
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
