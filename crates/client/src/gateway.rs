//! `BudgetGateway` backed by the REST API.

use async_trait::async_trait;
use finwise_core::budget::{
    BudgetDraft, BudgetGateway, Category, CategoryAllocationDraft, CategoryQuery, CreatedBudget,
    NewCategory,
};
use finwise_shared::AppResult;
use finwise_shared::types::{BudgetId, UserCategoryId};

use crate::http::ApiClient;

#[async_trait]
impl BudgetGateway for ApiClient {
    async fn fetch_categories(&self, query: &CategoryQuery) -> AppResult<Vec<Category>> {
        Ok(self.list_categories(query).await?)
    }

    async fn create_category(&self, category: &NewCategory) -> AppResult<UserCategoryId> {
        Ok(Self::create_category(self, category).await?)
    }

    async fn create_budget(&self, draft: &BudgetDraft) -> AppResult<CreatedBudget> {
        Ok(Self::create_budget(self, draft).await?)
    }

    async fn create_allocation(
        &self,
        budget_id: BudgetId,
        allocation: &CategoryAllocationDraft,
    ) -> AppResult<()> {
        Ok(Self::create_allocation(self, budget_id, allocation).await?)
    }
}
