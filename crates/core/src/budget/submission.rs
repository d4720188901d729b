//! Budget submission sequencer.
//!
//! Creates the budget, then each allocation in entry order, one request at a
//! time. A failed budget creation aborts the whole sequence; a failed
//! allocation is recorded and the sequence moves on to the next one.
//! An authentication failure stops the sequence where it is.

use finwise_shared::AppError;
use finwise_shared::types::Money;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::gateway::BudgetGateway;
use super::types::{BudgetDraft, CategoryAllocationDraft, CreatedBudget};

/// What happened to one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationOutcome {
    /// The backend stored the allocation.
    Created,
    /// The backend rejected the allocation or could not be reached.
    Failed(AppError),
    /// Not attempted because the session ended earlier in the sequence.
    Skipped,
}

/// Result for a single allocation, keyed by its position in the draft list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationResult {
    /// Position in the submitted list.
    pub index: usize,
    /// Category name.
    pub display_name: String,
    /// Allocated amount.
    pub amount: Money,
    /// Outcome of the create call.
    pub outcome: AllocationOutcome,
}

impl AllocationResult {
    /// Returns true if the allocation was stored.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self.outcome, AllocationOutcome::Created)
    }
}

/// Everything the sequencer did after the budget itself was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    /// The created budget.
    pub budget: CreatedBudget,
    /// One entry per submitted allocation, in submission order.
    pub results: Vec<AllocationResult>,
}

impl SubmissionReport {
    /// Returns true if every allocation was stored.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(AllocationResult::is_created)
    }

    /// Allocations that were not stored.
    pub fn failures(&self) -> impl Iterator<Item = &AllocationResult> {
        self.results.iter().filter(|r| !r.is_created())
    }

    /// Number of stored allocations.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_created()).count()
    }

    /// Returns true if an allocation failed because the session ended.
    #[must_use]
    pub fn session_expired(&self) -> bool {
        self.results.iter().any(|r| {
            matches!(
                r.outcome,
                AllocationOutcome::Failed(AppError::Unauthorized(_))
            )
        })
    }
}

/// Fatal submission errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The budget itself could not be created; no allocation was attempted.
    #[error("Failed to create budget: {0}")]
    BudgetCreation(#[source] AppError),
}

impl SubmissionError {
    /// Returns the underlying backend error.
    #[must_use]
    pub fn app_error(&self) -> &AppError {
        match self {
            Self::BudgetCreation(e) => e,
        }
    }

    /// Returns true if the failure was an expired or missing session.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.app_error(), AppError::Unauthorized(_))
    }
}

/// Creates a budget and its allocations.
///
/// Requests are issued strictly one after another.
pub async fn submit_budget<G>(
    gateway: &G,
    draft: &BudgetDraft,
    allocations: &[CategoryAllocationDraft],
) -> Result<SubmissionReport, SubmissionError>
where
    G: BudgetGateway + ?Sized,
{
    let budget = gateway.create_budget(draft).await.map_err(|e| {
        error!(
            error = %e,
            code = e.error_code(),
            budget_name = %draft.name,
            "Budget creation failed"
        );
        SubmissionError::BudgetCreation(e)
    })?;
    info!(
        budget_id = %budget.budget_id,
        allocations = allocations.len(),
        "Budget created"
    );

    let mut results = Vec::with_capacity(allocations.len());
    let mut session_ended = false;

    for (index, allocation) in allocations.iter().enumerate() {
        let outcome = if session_ended {
            AllocationOutcome::Skipped
        } else {
            match gateway.create_allocation(budget.budget_id, allocation).await {
                Ok(()) => {
                    debug!(index, category = %allocation.display_name, "Allocation created");
                    AllocationOutcome::Created
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        code = e.error_code(),
                        index,
                        category = %allocation.display_name,
                        "Allocation failed"
                    );
                    session_ended = matches!(e, AppError::Unauthorized(_));
                    AllocationOutcome::Failed(e)
                }
            }
        };

        results.push(AllocationResult {
            index,
            display_name: allocation.display_name.clone(),
            amount: allocation.amount,
            outcome,
        });
    }

    Ok(SubmissionReport { budget, results })
}

#[cfg(test)]
#[path = "submission_tests.rs"]
mod tests;
