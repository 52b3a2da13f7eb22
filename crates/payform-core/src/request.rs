//! # Payment Request Types
//!
//! [`PaymentDraft`] is the editable, possibly incomplete set of values a
//! form holds. [`PaymentRequest`] is the complete payload sent to the
//! processor; the only way to obtain one from user input is
//! `PaymentRequest::try_from(draft)`, which refuses drafts with missing
//! required fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::field::PaymentField;

macro_rules! define_payment_types {
    ($($req:ident => $rvar:ident),* ; $($opt:ident => $ovar:ident),* $(,)?) => {
        /// Possibly incomplete payment values, as collected by a form.
        ///
        /// Every field is optional; a field counts as *present* only when it
        /// holds a non-empty string.
        #[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default, deny_unknown_fields)]
        pub struct PaymentDraft {
            $(
                #[allow(missing_docs)]
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $req: Option<String>,
            )*
            $(
                #[allow(missing_docs)]
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $opt: Option<String>,
            )*
        }

        impl PaymentDraft {
            /// Raw value of a field, empty strings included.
            pub fn get(&self, field: PaymentField) -> Option<&str> {
                match field {
                    $(PaymentField::$rvar => self.$req.as_deref(),)*
                    $(PaymentField::$ovar => self.$opt.as_deref(),)*
                }
            }

            fn slot_mut(&mut self, field: PaymentField) -> &mut Option<String> {
                match field {
                    $(PaymentField::$rvar => &mut self.$req,)*
                    $(PaymentField::$ovar => &mut self.$opt,)*
                }
            }
        }

        /// A complete payment request, ready to be posted to the processor.
        ///
        /// Serializes to the processor's snake_case JSON payload. `param` and
        /// `payment_status` are omitted when unset.
        #[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct PaymentRequest {
            $(
                #[allow(missing_docs)]
                pub $req: String,
            )*
            $(
                #[allow(missing_docs)]
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $opt: Option<String>,
            )*
        }

        impl TryFrom<PaymentDraft> for PaymentRequest {
            type Error = ConversionError;

            fn try_from(draft: PaymentDraft) -> Result<Self, Self::Error> {
                let missing = draft.missing_required();
                if !missing.is_empty() {
                    return Err(ConversionError::MissingFields(missing));
                }
                Ok(Self {
                    $($req: draft.$req.unwrap_or_default(),)*
                    $($opt: draft.$opt,)*
                })
            }
        }

        impl From<PaymentRequest> for PaymentDraft {
            fn from(req: PaymentRequest) -> Self {
                Self {
                    $($req: Some(req.$req),)*
                    $($opt: req.$opt,)*
                }
            }
        }
    };
}

define_payment_types! {
    merchant_identifier => MerchantIdentifier,
    currency => Currency,
    ccn => Ccn,
    exp_month => ExpMonth,
    exp_year => ExpYear,
    cvc_code => CvcCode,
    email => Email,
    phone_number => PhoneNumber,
    ip => Ip,
    first_name => FirstName,
    last_name => LastName,
    amount => Amount,
    city => City,
    state => State,
    country => Country,
    region => Region,
    zip_code => ZipCode,
    address => Address,
    redirect_url => RedirectUrl,
    postback_url => PostbackUrl,
    description => Description,
    descriptor => Descriptor;
    param => Param,
    payment_status => PaymentStatus,
}

impl PaymentDraft {
    /// Value of a field if it is present (non-empty).
    pub fn present(&self, field: PaymentField) -> Option<&str> {
        self.get(field).filter(|v| !v.is_empty())
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: PaymentField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: PaymentField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Remove a field's value.
    pub fn clear(&mut self, field: PaymentField) {
        *self.slot_mut(field) = None;
    }

    /// Overlay `other` on top of `self`: every field set in `other`
    /// replaces the corresponding value here.
    pub fn merge(&mut self, other: &PaymentDraft) {
        for field in PaymentField::ALL {
            if let Some(value) = other.get(field) {
                self.set(field, value);
            }
        }
    }

    /// Required fields that are absent or empty, in declaration order.
    pub fn missing_required(&self) -> Vec<PaymentField> {
        PaymentField::REQUIRED
            .iter()
            .copied()
            .filter(|field| self.present(*field).is_none())
            .collect()
    }
}

impl PaymentRequest {
    /// Card number reduced to its last four digits, for logs and display.
    pub fn masked_card_number(&self) -> String {
        mask_card_number(&self.ccn)
    }
}

pub(crate) fn mask_card_number(ccn: &str) -> String {
    let digits: Vec<char> = ccn.chars().filter(char::is_ascii_digit).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("****{tail}")
}

// Card data never reaches Debug output in clear.

impl fmt::Debug for PaymentDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("PaymentDraft");
        for field in PaymentField::ALL {
            let Some(value) = self.get(field) else { continue };
            match field {
                PaymentField::Ccn => s.field(field.as_str(), &mask_card_number(value)),
                PaymentField::CvcCode => s.field(field.as_str(), &"[REDACTED]"),
                _ => s.field(field.as_str(), &value),
            };
        }
        s.finish()
    }
}

impl fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentRequest")
            .field("merchant_identifier", &self.merchant_identifier)
            .field("currency", &self.currency)
            .field("amount", &self.amount)
            .field("ccn", &self.masked_card_number())
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cvc_code", &"[REDACTED]")
            .field("email", &self.email)
            .field("ip", &self.ip)
            .field("country", &self.country)
            .field("redirect_url", &self.redirect_url)
            .field("postback_url", &self.postback_url)
            .field("description", &self.description)
            .field("descriptor", &self.descriptor)
            .field("param", &self.param)
            .field("payment_status", &self.payment_status)
            .finish_non_exhaustive()
    }
}
