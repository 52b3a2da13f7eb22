//! Static, caller-supplied context merged into every payment request.

use serde::{Deserialize, Serialize};

use crate::field::PaymentField;
use crate::request::PaymentDraft;

/// Currency used when the caller does not set one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Description and descriptor used when the caller does not set them.
pub const DEFAULT_DESCRIPTION: &str = "Payment";

/// Payment status asserted when the caller does not set one.
pub const DEFAULT_PAYMENT_STATUS: &str = "approved";

/// Merchant identity, routing URLs and pre-filled payment details supplied
/// by the embedding application rather than typed by the cardholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionContext {
    /// Merchant identifier issued by the processor.
    pub merchant_identifier: String,
    /// Browser redirect target after the payment.
    pub redirect_url: String,
    /// Processor callback for the final transaction status.
    pub postback_url: String,
    /// Pre-filled amount; the cardholder may still edit it.
    #[serde(default)]
    pub amount: Option<String>,
    /// Defaults to [`DEFAULT_CURRENCY`].
    #[serde(default)]
    pub currency: Option<String>,
    /// Defaults to [`DEFAULT_DESCRIPTION`].
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to [`DEFAULT_DESCRIPTION`].
    #[serde(default)]
    pub descriptor: Option<String>,
    /// Pass-through value returned untouched by the processor.
    #[serde(default)]
    pub param: Option<String>,
    /// Defaults to [`DEFAULT_PAYMENT_STATUS`].
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl SubmissionContext {
    /// Context with the three mandatory values and every default.
    pub fn new(
        merchant_identifier: impl Into<String>,
        redirect_url: impl Into<String>,
        postback_url: impl Into<String>,
    ) -> Self {
        Self {
            merchant_identifier: merchant_identifier.into(),
            redirect_url: redirect_url.into(),
            postback_url: postback_url.into(),
            ..Self::default()
        }
    }

    /// The draft a fresh form starts from: context values with defaults
    /// applied for currency, description, descriptor and payment status.
    pub fn to_draft(&self) -> PaymentDraft {
        let mut draft = PaymentDraft::default()
            .with(PaymentField::MerchantIdentifier, &self.merchant_identifier)
            .with(PaymentField::RedirectUrl, &self.redirect_url)
            .with(PaymentField::PostbackUrl, &self.postback_url)
            .with(PaymentField::Currency, or_default(&self.currency, DEFAULT_CURRENCY))
            .with(PaymentField::Description, or_default(&self.description, DEFAULT_DESCRIPTION))
            .with(PaymentField::Descriptor, or_default(&self.descriptor, DEFAULT_DESCRIPTION))
            .with(
                PaymentField::PaymentStatus,
                or_default(&self.payment_status, DEFAULT_PAYMENT_STATUS),
            );
        if let Some(amount) = &self.amount {
            draft.set(PaymentField::Amount, amount);
        }
        if let Some(param) = &self.param {
            draft.set(PaymentField::Param, param);
        }
        draft
    }
}

// Empty strings fall back too: the embedding form treats them as unset.
fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_unset_values() {
        let ctx = SubmissionContext::new("mid-1", "https://demo.io/", "https://hook.example/pb");
        let draft = ctx.to_draft();
        assert_eq!(draft.get(PaymentField::Currency), Some("USD"));
        assert_eq!(draft.get(PaymentField::Description), Some("Payment"));
        assert_eq!(draft.get(PaymentField::Descriptor), Some("Payment"));
        assert_eq!(draft.get(PaymentField::PaymentStatus), Some("approved"));
        assert_eq!(draft.get(PaymentField::Param), None);
        assert_eq!(draft.get(PaymentField::Amount), None);
        assert_eq!(draft.get(PaymentField::MerchantIdentifier), Some("mid-1"));
    }

    #[test]
    fn explicit_values_win() {
        let ctx = SubmissionContext {
            currency: Some("EUR".into()),
            description: Some("Description Customer".into()),
            descriptor: Some("".into()),
            amount: Some("5.00".into()),
            param: Some("Pass-through-Param-test".into()),
            ..SubmissionContext::new("mid-1", "r", "p")
        };
        let draft = ctx.to_draft();
        assert_eq!(draft.get(PaymentField::Currency), Some("EUR"));
        assert_eq!(draft.get(PaymentField::Description), Some("Description Customer"));
        assert_eq!(draft.get(PaymentField::Descriptor), Some("Payment"));
        assert_eq!(draft.get(PaymentField::Amount), Some("5.00"));
        assert_eq!(draft.get(PaymentField::Param), Some("Pass-through-Param-test"));
    }
}
