//! Wizard error types.
//!
//! These are caller mistakes (acting on the wrong step, re-entering a
//! submission). Backend failures are reported as alerts instead.

use thiserror::Error;

use super::step::StepKind;

/// Errors raised by wizard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The operation is not available on the current step.
    #[error("Operation requires the {expected} step, but the wizard is on {actual}")]
    WrongStep {
        /// Step the operation belongs to.
        expected: StepKind,
        /// Step the wizard is on.
        actual: StepKind,
    },

    /// A submission is already running or was abandoned mid-flight.
    #[error("A budget submission is already in progress")]
    SubmissionInProgress,

    /// The inline category form is not open.
    #[error("The new category form is not open")]
    CategoryFormClosed,
}
