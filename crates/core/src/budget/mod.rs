//! Budget drafting, allocation totals, and submission.

pub mod allocation;
pub mod gateway;
pub mod submission;
pub mod types;


pub use allocation::{AddAllocation, AllocationList, AllocationSummary};
pub use gateway::BudgetGateway;
pub use submission::{
    AllocationOutcome, AllocationResult, SubmissionError, SubmissionReport, submit_budget,
};
pub use types::{
    BudgetDraft, Category, CategoryAllocationDraft, CategoryQuery, CategoryType, CreatedBudget,
    NewCategory, PeriodType,
};
