//! Budget creation wizard.
//!
//! Drives the two steps, owns the allocation list, and turns backend
//! results into alerts and navigation decisions. The wizard never talks
//! HTTP itself; every remote call goes through a [`BudgetGateway`].

use finwise_shared::AppError;
use finwise_shared::types::Money;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use super::error::WizardError;
use super::step::{
    BasicInfo, CategoryOption, CategoryStep, NewCategoryForm, StepKind, WizardStep,
};
use crate::budget::{
    AddAllocation, AllocationSummary, BudgetDraft, BudgetGateway, Category,
    CategoryAllocationDraft, CategoryQuery, NewCategory, SubmissionReport, submit_budget,
};

/// Shown when category creation fails without a server message.
pub const CATEGORY_CREATE_FALLBACK: &str = "Failed to create category";

/// Shown when budget creation fails without a server message.
pub const BUDGET_CREATE_FALLBACK: &str = "Failed to create budget";

/// Where the front end should go after an operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigate {
    /// Remain in the wizard.
    #[default]
    Stay,
    /// Leave the wizard for the budget list.
    BudgetList,
    /// The session is gone; go to the login screen.
    Login,
}

/// A message the front end shows to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// The budget and every allocation were stored.
    FullSuccess {
        /// Name of the created budget.
        budget_name: String,
    },
    /// The budget was stored but some allocations were not.
    PartialSuccess {
        /// Name of the created budget.
        budget_name: String,
        /// Names of the allocations that failed.
        failed: Vec<String>,
    },
    /// The budget could not be created; nothing was stored.
    BudgetFailed {
        /// Server message or fallback.
        message: String,
    },
    /// The inline category could not be created.
    CategoryFailed {
        /// Server message or fallback.
        message: String,
    },
}

impl Alert {
    /// Returns true for alerts that report a failure of some kind.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::FullSuccess { .. })
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullSuccess { budget_name } => {
                write!(f, "Budget \"{budget_name}\" created successfully!")
            }
            Self::PartialSuccess {
                budget_name,
                failed,
            } => write!(
                f,
                "Budget \"{budget_name}\" created, but some categories failed to save: {}",
                failed.join(", ")
            ),
            Self::BudgetFailed { message } | Self::CategoryFailed { message } => {
                f.write_str(message)
            }
        }
    }
}

/// Alert and navigation produced by a wizard operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effect {
    /// Message to show, if any.
    pub alert: Option<Alert>,
    /// Where to go next.
    pub navigate: Navigate,
}

impl Effect {
    const fn stay() -> Self {
        Self {
            alert: None,
            navigate: Navigate::Stay,
        }
    }

    const fn login() -> Self {
        Self {
            alert: None,
            navigate: Navigate::Login,
        }
    }

    const fn alert(alert: Alert, navigate: Navigate) -> Self {
        Self {
            alert: Some(alert),
            navigate,
        }
    }
}

/// The budget creation wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetWizard {
    step: WizardStep,
    submitting: bool,
}

impl BudgetWizard {
    /// Starts a fresh wizard on the basics step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a wizard on the basics step with a prefilled draft.
    #[must_use]
    pub fn with_draft(draft: BudgetDraft) -> Self {
        Self {
            step: WizardStep::BasicInfo(BasicInfo { draft }),
            submitting: false,
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> &WizardStep {
        &self.step
    }

    /// Budget draft, readable on either step.
    #[must_use]
    pub const fn draft(&self) -> &BudgetDraft {
        self.step.draft()
    }

    /// Returns true while a submission is running, or if one was abandoned.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Mutable access to the draft. Only the basics step edits it.
    pub fn basics_mut(&mut self) -> Result<&mut BudgetDraft, WizardError> {
        let actual = self.step.kind();
        match &mut self.step {
            WizardStep::BasicInfo(basics) => Ok(&mut basics.draft),
            WizardStep::Categories(_) => Err(WizardError::WrongStep {
                expected: StepKind::BasicInfo,
                actual,
            }),
        }
    }

    /// Moves from the basics step to the category step.
    ///
    /// No validation is applied to the draft. Categories are fetched on the
    /// way in; a failed fetch leaves the picker empty.
    pub async fn next<G>(&mut self, gateway: &G) -> Result<Navigate, WizardError>
    where
        G: BudgetGateway + ?Sized,
    {
        if self.step.kind() != StepKind::BasicInfo {
            return Err(self.wrong_step(StepKind::BasicInfo));
        }

        let Ok(categories) = load_categories(gateway).await else {
            self.reset();
            return Ok(Navigate::Login);
        };

        let draft = self.draft().clone();
        self.step = WizardStep::Categories(CategoryStep::new(draft, categories));
        Ok(Navigate::Stay)
    }

    /// Allocations added so far. Empty on the basics step.
    #[must_use]
    pub fn allocations(&self) -> &[CategoryAllocationDraft] {
        match &self.step {
            WizardStep::BasicInfo(_) => &[],
            WizardStep::Categories(step) => step.allocations.entries(),
        }
    }

    /// Totals against the draft's total amount.
    #[must_use]
    pub fn summary(&self) -> AllocationSummary {
        match &self.step {
            WizardStep::BasicInfo(basics) => {
                AllocationSummary::new(basics.draft.total_amount, Money::ZERO)
            }
            WizardStep::Categories(step) => step.allocations.summary(step.draft.total_amount),
        }
    }

    /// Options for the category picker.
    pub fn category_options(&self) -> Result<Vec<CategoryOption<'_>>, WizardError> {
        Ok(self.category_step()?.options())
    }

    /// Fetched categories.
    pub fn categories(&self) -> Result<&[Category], WizardError> {
        Ok(&self.category_step()?.categories)
    }

    /// Adds an allocation for the selected category.
    ///
    /// `selection` is a category ID or display name from the picker. A
    /// missing selection, or one that matches no fetched category, leaves
    /// the list unchanged and reports [`AddAllocation::Ignored`].
    pub fn add_allocation(
        &mut self,
        selection: Option<&str>,
        amount: Money,
    ) -> Result<AddAllocation, WizardError> {
        let step = self.category_step_mut()?;
        let Some(category) = selection.and_then(|s| step.resolve(s)) else {
            return Ok(AddAllocation::Ignored);
        };
        let draft = CategoryAllocationDraft::new(
            Some(category.category_id),
            category.display_name.clone(),
            amount,
        );
        Ok(step.allocations.add(draft))
    }

    /// Removes the allocation at `index`. Out-of-range indexes return `None`.
    pub fn remove_allocation(
        &mut self,
        index: usize,
    ) -> Result<Option<CategoryAllocationDraft>, WizardError> {
        Ok(self.category_step_mut()?.allocations.remove(index))
    }

    /// Opens the inline category form, or returns the one already open.
    pub fn open_new_category_form(&mut self) -> Result<&mut NewCategoryForm, WizardError> {
        let step = self.category_step_mut()?;
        Ok(step.new_category.get_or_insert_with(NewCategoryForm::default))
    }

    /// Mutable access to the open category form.
    pub fn new_category_form_mut(&mut self) -> Result<&mut NewCategoryForm, WizardError> {
        self.category_step_mut()?
            .new_category
            .as_mut()
            .ok_or(WizardError::CategoryFormClosed)
    }

    /// Discards the inline category form.
    pub fn close_new_category_form(&mut self) -> Result<(), WizardError> {
        self.category_step_mut()?.new_category = None;
        Ok(())
    }

    /// Creates the category described by the open form.
    ///
    /// On success the picker is reloaded and the form closes. On failure the
    /// form stays open and the alert carries the server message.
    pub async fn create_category<G>(&mut self, gateway: &G) -> Result<Effect, WizardError>
    where
        G: BudgetGateway + ?Sized,
    {
        let form = self
            .category_step()?
            .new_category
            .clone()
            .ok_or(WizardError::CategoryFormClosed)?;
        let request = NewCategory {
            name: form.name.trim().to_string(),
            category_type: form.category_type,
        };

        let category_id = match gateway.create_category(&request).await {
            Ok(id) => id,
            Err(AppError::Unauthorized(_)) => {
                self.reset();
                return Ok(Effect::login());
            }
            Err(e) => {
                warn!(
                    error = %e,
                    code = e.error_code(),
                    name = %request.name,
                    "Category creation failed"
                );
                let message = message_or(&e, CATEGORY_CREATE_FALLBACK);
                return Ok(Effect::alert(Alert::CategoryFailed { message }, Navigate::Stay));
            }
        };
        info!(%category_id, name = %request.name, "Category created");

        let Ok(mut categories) = load_categories(gateway).await else {
            self.reset();
            return Ok(Effect::login());
        };

        let step = self.category_step_mut()?;
        if categories.is_empty() {
            // An empty reload means the fetch failed; keep the current list.
            categories = std::mem::take(&mut step.categories);
        }
        if !categories.iter().any(|c| c.category_id == category_id) {
            categories.push(Category {
                category_id,
                display_name: request.name,
                category_type: request.category_type,
            });
        }
        step.categories = categories;
        step.new_category = None;
        Ok(Effect::stay())
    }

    /// Submits the budget and its allocations.
    ///
    /// On success the wizard resets and the front end should show the budget
    /// list. If the budget itself fails the wizard keeps every field so the
    /// user can retry.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<Effect, WizardError>
    where
        G: BudgetGateway + ?Sized,
    {
        if self.submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        let (draft, allocations) = {
            let step = self.category_step()?;
            (step.draft.clone(), step.allocations.entries().to_vec())
        };

        self.submitting = true;
        let result = submit_budget(gateway, &draft, &allocations).await;
        self.submitting = false;

        match result {
            Ok(report) if report.session_expired() => {
                self.reset();
                Ok(Effect::login())
            }
            Ok(report) => {
                self.reset();
                Ok(Effect::alert(success_alert(&report), Navigate::BudgetList))
            }
            Err(e) if e.is_unauthorized() => {
                self.reset();
                Ok(Effect::login())
            }
            Err(e) => {
                let message = message_or(e.app_error(), BUDGET_CREATE_FALLBACK);
                Ok(Effect::alert(Alert::BudgetFailed { message }, Navigate::Stay))
            }
        }
    }

    /// Abandons the wizard, discarding every field.
    pub fn cancel(&mut self) -> Navigate {
        self.reset();
        Navigate::BudgetList
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn category_step(&self) -> Result<&CategoryStep, WizardError> {
        match &self.step {
            WizardStep::Categories(step) => Ok(step),
            WizardStep::BasicInfo(_) => Err(self.wrong_step(StepKind::Categories)),
        }
    }

    fn category_step_mut(&mut self) -> Result<&mut CategoryStep, WizardError> {
        let actual = self.step.kind();
        match &mut self.step {
            WizardStep::Categories(step) => Ok(step),
            WizardStep::BasicInfo(_) => Err(WizardError::WrongStep {
                expected: StepKind::Categories,
                actual,
            }),
        }
    }

    const fn wrong_step(&self, expected: StepKind) -> WizardError {
        WizardError::WrongStep {
            expected,
            actual: self.step.kind(),
        }
    }
}

/// Loads the picker categories. Only an expired session is an error.
async fn load_categories<G>(gateway: &G) -> Result<Vec<Category>, AppError>
where
    G: BudgetGateway + ?Sized,
{
    match gateway.fetch_categories(&CategoryQuery::expense_picker()).await {
        Ok(categories) => Ok(categories),
        Err(e @ AppError::Unauthorized(_)) => Err(e),
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "Failed to load categories");
            Ok(Vec::new())
        }
    }
}

fn success_alert(report: &SubmissionReport) -> Alert {
    let budget_name = report.budget.budget_name.clone();
    if report.all_succeeded() {
        Alert::FullSuccess { budget_name }
    } else {
        Alert::PartialSuccess {
            budget_name,
            failed: report.failures().map(|r| r.display_name.clone()).collect(),
        }
    }
}

fn message_or(error: &AppError, fallback: &str) -> String {
    error
        .server_message()
        .map_or_else(|| fallback.to_string(), str::to_string)
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
