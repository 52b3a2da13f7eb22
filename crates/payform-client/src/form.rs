//! Form-side state: the values being edited, the errors on display, and
//! whether a submission is in flight.
//!
//! A form starts from its [`SubmissionContext`] defaults. Editing any field
//! clears the displayed errors. At most one submission runs per form; a
//! second [`PaymentForm::begin_submit`] before [`PaymentForm::finish`]
//! returns [`FormError::InFlight`].

use payform_core::{PaymentDraft, PaymentField, PaymentResponse, Submission, SubmissionContext};

use crate::error::FormError;
use crate::PaymentClient;

/// Editable payment form.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    values: PaymentDraft,
    errors: Vec<String>,
    submitting: bool,
}

impl PaymentForm {
    /// A form pre-filled with the context's amount, currency, description
    /// and descriptor.
    pub fn new(context: &SubmissionContext) -> Self {
        let defaults = context.to_draft();
        let mut values = PaymentDraft::default();
        for field in [
            PaymentField::Amount,
            PaymentField::Currency,
            PaymentField::Description,
            PaymentField::Descriptor,
        ] {
            if let Some(v) = defaults.get(field) {
                values.set(field, v);
            }
        }
        Self {
            values,
            errors: Vec::new(),
            submitting: false,
        }
    }

    /// Current form values.
    pub fn values(&self) -> &PaymentDraft {
        &self.values
    }

    /// Update one field. Clears displayed errors.
    pub fn set_field(&mut self, field: PaymentField, value: impl Into<String>) {
        self.values.set(field, value);
        self.errors.clear();
    }

    /// Errors from the last finished submission, in display order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Mark a submission as started and hand out the values to submit.
    pub fn begin_submit(&mut self) -> Result<PaymentDraft, FormError> {
        if self.submitting {
            return Err(FormError::InFlight);
        }
        self.submitting = true;
        self.errors.clear();
        Ok(self.values.clone())
    }

    /// Record the outcome of the in-flight submission.
    ///
    /// A rejected submission shows every violation message; a failed one
    /// shows its error text.
    pub fn finish(&mut self, submission: Submission) -> Result<PaymentResponse, FormError> {
        if !self.submitting {
            return Err(FormError::NotInFlight);
        }
        self.submitting = false;

        self.errors = if submission.violations().is_empty() {
            Vec::new()
        } else {
            submission.violations().iter().map(ToString::to_string).collect()
        };

        let response = submission
            .into_response()
            .unwrap_or_else(|| PaymentResponse::failure(crate::error::UNKNOWN_ERROR));
        if self.errors.is_empty() {
            if let Some(e) = response.error() {
                self.errors.push(e.to_string());
            }
        }
        Ok(response)
    }

    /// Submit the current values through `client`.
    pub async fn submit(&mut self, client: &PaymentClient) -> Result<PaymentResponse, FormError> {
        let values = self.begin_submit()?;
        let submission = client.submit_tracked(&values).await;
        self.finish(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payform_core::{validate_payment_data, SubmissionPhase};

    fn complete_values() -> PaymentDraft {
        let mut draft = context().to_draft();
        for (field, value) in [
            (PaymentField::Ccn, "4412397212080000"),
            (PaymentField::ExpMonth, "03"),
            (PaymentField::ExpYear, "2099"),
            (PaymentField::CvcCode, "003"),
            (PaymentField::Email, "ada@example.com"),
            (PaymentField::PhoneNumber, "5551234567"),
            (PaymentField::Ip, "127.0.0.1"),
            (PaymentField::FirstName, "Ada"),
            (PaymentField::LastName, "Lovelace"),
            (PaymentField::City, "Sunnyvale"),
            (PaymentField::State, "CA"),
            (PaymentField::Country, "US"),
            (PaymentField::Region, "West"),
            (PaymentField::ZipCode, "94085"),
            (PaymentField::Address, "1 Main St"),
        ] {
            draft.set(field, value);
        }
        draft
    }

    fn context() -> SubmissionContext {
        let mut ctx =
            SubmissionContext::new("mid-1", "https://demo.io/", "https://hook.example/pb");
        ctx.amount = Some("10.00".into());
        ctx
    }

    #[test]
    fn new_form_carries_context_defaults() {
        let form = PaymentForm::new(&context());
        assert_eq!(form.values().get(PaymentField::Amount), Some("10.00"));
        assert_eq!(form.values().get(PaymentField::Currency), Some("USD"));
        assert_eq!(form.values().get(PaymentField::Description), Some("Payment"));
        assert_eq!(form.values().get(PaymentField::MerchantIdentifier), None);
        assert!(form.errors().is_empty());
        assert!(!form.is_submitting());
    }

    #[test]
    fn second_begin_is_refused() {
        let mut form = PaymentForm::new(&context());
        form.begin_submit().unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit().unwrap_err(), FormError::InFlight);
    }

    #[test]
    fn finish_without_begin_is_refused() {
        let mut form = PaymentForm::new(&context());
        assert_eq!(
            form.finish(Submission::new()).unwrap_err(),
            FormError::NotInFlight
        );
    }

    #[test]
    fn rejected_submission_shows_every_violation() {
        let mut form = PaymentForm::new(&context());
        let values = form.begin_submit().unwrap();

        let mut submission = Submission::new();
        submission.begin_validation().unwrap();
        submission
            .apply_validation(validate_payment_data(&values))
            .unwrap();
        assert_eq!(submission.phase(), SubmissionPhase::Rejected);
        let expected = submission.violations().len();

        let resp = form.finish(submission).unwrap();
        assert!(!resp.is_success());
        assert_eq!(form.errors().len(), expected);
        assert_eq!(form.errors()[0], "merchant_identifier is required");
        assert!(!form.is_submitting());
    }

    #[test]
    fn failed_submission_shows_error_text() {
        let mut form = PaymentForm::new(&context());
        form.begin_submit().unwrap();

        let mut submission = Submission::new();
        submission.begin_validation().unwrap();
        submission
            .apply_validation(validate_payment_data(&complete_values()))
            .unwrap();
        submission
            .complete(PaymentResponse::failure("Card declined"))
            .unwrap();

        form.finish(submission).unwrap();
        assert_eq!(form.errors(), ["Card declined".to_string()]);
    }

    #[test]
    fn editing_clears_errors() {
        let mut form = PaymentForm::new(&context());
        form.begin_submit().unwrap();
        let mut submission = Submission::new();
        submission.begin_validation().unwrap();
        submission
            .apply_validation(validate_payment_data(form.values()))
            .unwrap();
        form.finish(submission).unwrap();
        assert!(!form.errors().is_empty());

        form.set_field(PaymentField::FirstName, "Ada");
        assert!(form.errors().is_empty());
        assert_eq!(form.values().get(PaymentField::FirstName), Some("Ada"));
    }
}
