//! Backend operations the budget wizard depends on.
//!
//! The HTTP client implements this trait; tests substitute a mock.

use async_trait::async_trait;
use finwise_shared::AppResult;
use finwise_shared::types::{BudgetId, UserCategoryId};

use super::types::{
    BudgetDraft, Category, CategoryAllocationDraft, CategoryQuery, CreatedBudget, NewCategory,
};

/// Remote operations used by the budget creation flow.
///
/// Implementations report failures through `AppError`; an
/// `AppError::Unauthorized` means the session is gone and the caller
/// should stop and send the user back to the login screen.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BudgetGateway: Send + Sync {
    /// Lists the caller's categories.
    async fn fetch_categories(&self, query: &CategoryQuery) -> AppResult<Vec<Category>>;

    /// Creates a user category.
    async fn create_category(&self, category: &NewCategory) -> AppResult<UserCategoryId>;

    /// Creates a budget from the draft.
    async fn create_budget(&self, draft: &BudgetDraft) -> AppResult<CreatedBudget>;

    /// Creates one category allocation inside an existing budget.
    async fn create_allocation(
        &self,
        budget_id: BudgetId,
        allocation: &CategoryAllocationDraft,
    ) -> AppResult<()>;
}
