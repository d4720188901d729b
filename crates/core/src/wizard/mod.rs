//! Two-step budget creation wizard.
//!
//! Step one collects the budget basics, step two the category allocations.
//! Submission creates the budget and then each allocation in order.

pub mod controller;
pub mod error;
pub mod step;

pub use controller::{
    Alert, BUDGET_CREATE_FALLBACK, BudgetWizard, CATEGORY_CREATE_FALLBACK, Effect, Navigate,
};
pub use error::WizardError;
pub use step::{
    BasicInfo, CategoryOption, CategoryStep, NO_CATEGORY_FOUND, NewCategoryForm, StepKind,
    WizardStep,
};
