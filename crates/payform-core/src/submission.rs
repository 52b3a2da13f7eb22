//! # Submission State Machine
//!
//! One submission attempt moves through:
//!
//! ```text
//! Idle -> Validating -> Rejected
//!                    -> Submitting -> Succeeded
//!                                  -> Failed
//! ```
//!
//! `Rejected`, `Succeeded` and `Failed` are terminal. There are no retry
//! states: resubmitting starts a new [`Submission`] from a fresh request.

use serde::{Deserialize, Serialize};

use crate::error::SubmissionError;
use crate::response::PaymentResponse;
use crate::validation::{ValidationResult, Violation};

/// Phase of a single submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionPhase {
    /// Created, nothing done yet.
    Idle,
    /// Payment data is being validated locally.
    Validating,
    /// Local validation failed; no request was sent. Terminal.
    Rejected,
    /// The payment request is in flight.
    Submitting,
    /// The processor accepted the payment. Terminal.
    Succeeded,
    /// The processor or the network rejected the payment. Terminal.
    Failed,
}

impl SubmissionPhase {
    /// Whether this is a terminal phase (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Succeeded | Self::Failed)
    }

    /// Whether `self -> to` is a legal transition.
    pub fn can_transition_to(&self, to: SubmissionPhase) -> bool {
        matches!(
            (self, to),
            (Self::Idle, Self::Validating)
                | (Self::Validating, Self::Rejected)
                | (Self::Validating, Self::Submitting)
                | (Self::Submitting, Self::Succeeded)
                | (Self::Submitting, Self::Failed)
        )
    }
}

/// A single submission attempt and, once terminal, its outcome.
#[derive(Debug, Clone)]
pub struct Submission {
    phase: SubmissionPhase,
    violations: Vec<Violation>,
    response: Option<PaymentResponse>,
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

impl Submission {
    /// A new attempt in [`SubmissionPhase::Idle`].
    pub fn new() -> Self {
        Self {
            phase: SubmissionPhase::Idle,
            violations: Vec::new(),
            response: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Violations that caused a rejection. Empty unless `Rejected`.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The outcome, once the attempt is terminal.
    pub fn response(&self) -> Option<&PaymentResponse> {
        self.response.as_ref()
    }

    /// Consume the attempt, yielding its outcome if terminal.
    pub fn into_response(self) -> Option<PaymentResponse> {
        self.response
    }

    /// `Idle -> Validating`.
    pub fn begin_validation(&mut self) -> Result<(), SubmissionError> {
        self.transition(SubmissionPhase::Validating)
    }

    /// Apply the validation outcome: `Validating -> Rejected` with a failure
    /// response summarizing the violations, or `Validating -> Submitting`.
    pub fn apply_validation(&mut self, result: ValidationResult) -> Result<(), SubmissionError> {
        if result.is_valid() {
            return self.transition(SubmissionPhase::Submitting);
        }
        self.transition(SubmissionPhase::Rejected)?;
        self.response = Some(PaymentResponse::failure(result.summary()));
        self.violations = result.into_errors();
        Ok(())
    }

    /// Record the processor outcome: `Submitting -> Succeeded | Failed`.
    pub fn complete(&mut self, response: PaymentResponse) -> Result<(), SubmissionError> {
        let to = if response.is_success() {
            SubmissionPhase::Succeeded
        } else {
            SubmissionPhase::Failed
        };
        self.transition(to)?;
        self.response = Some(response);
        Ok(())
    }

    fn transition(&mut self, to: SubmissionPhase) -> Result<(), SubmissionError> {
        if !self.phase.can_transition_to(to) {
            return Err(SubmissionError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }
}
