//! Budget endpoints.
//!
//! The backend returns budget records with mixed key casing (`BudgetID`
//! next to `budget_name`), so the response types accept both spellings.

use chrono::NaiveDate;
use finwise_core::budget::{BudgetDraft, CategoryAllocationDraft, CreatedBudget, PeriodType};
use finwise_shared::types::{BudgetId, Money, PageWindow, SortOrder, UserCategoryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ClientResult;
use crate::http::ApiClient;

const BUDGETS: &str = "/budgets/";

/// Body of `POST /budgets/`.
#[derive(Debug, Serialize)]
struct CreateBudgetRequest<'a> {
    budget_name: &'a str,
    budget_type: PeriodType,
    amount: Money,
    period_start: NaiveDate,
    period_end: Option<NaiveDate>,
}

impl<'a> From<&'a BudgetDraft> for CreateBudgetRequest<'a> {
    fn from(draft: &'a BudgetDraft) -> Self {
        Self {
            budget_name: &draft.name,
            budget_type: draft.period_type,
            amount: draft.total_amount,
            period_start: draft.period_start,
            period_end: draft.period_end,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedBudgetResponse {
    #[serde(rename = "BudgetID", alias = "budget_id")]
    budget_id: BudgetId,
    #[serde(default, alias = "BudgetName")]
    budget_name: Option<String>,
}

/// Body of `POST /budgets/{id}/categories`.
#[derive(Debug, Serialize)]
struct CreateAllocationRequest<'a> {
    category_display_name: &'a str,
    allocated_amount: Money,
}

/// Filters for the budget list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BudgetFilter {
    /// Only budgets of this period type.
    pub budget_type: Option<PeriodType>,
    /// Only active, or only inactive, budgets.
    pub is_active: Option<bool>,
    /// Pagination window.
    pub window: PageWindow,
    /// Sort direction on creation time.
    pub sort_order: SortOrder,
}

impl BudgetFilter {
    /// Query-string pairs, newest first by default.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.window.skip.to_string()),
            ("limit", self.window.limit.to_string()),
            ("sort_by", "CreatedAt".to_string()),
            ("sort_order", self.sort_order.as_str().to_string()),
        ];
        if let Some(budget_type) = self.budget_type {
            pairs.push(("budget_type", budget_type.as_str().to_string()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("is_active", is_active.to_string()));
        }
        pairs
    }
}

/// A budget as shown in the budget list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BudgetSummary {
    /// Budget ID.
    #[serde(rename = "BudgetID", alias = "budget_id")]
    pub budget_id: BudgetId,
    /// Budget name.
    #[serde(alias = "BudgetName")]
    pub budget_name: String,
    /// Period type.
    #[serde(alias = "BudgetType")]
    pub budget_type: PeriodType,
    /// Total amount.
    #[serde(alias = "Amount")]
    pub amount: Money,
    /// First day of the period.
    #[serde(alias = "PeriodStart")]
    pub period_start: NaiveDate,
    /// Last day of the period.
    #[serde(default, alias = "PeriodEnd")]
    pub period_end: Option<NaiveDate>,
    /// Amount spent so far, when the backend reports it.
    #[serde(default)]
    pub total_spent: Option<Money>,
    /// Whether the budget is active.
    #[serde(default = "default_active", alias = "IsActive")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct BudgetListResponse {
    #[serde(default)]
    budgets: Vec<BudgetSummary>,
}

/// Allocated versus actual spending for one category of a budget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryVsActual {
    /// User category ID.
    pub user_category_id: UserCategoryId,
    /// Category name.
    pub category_name: String,
    /// Amount allocated to the category.
    #[serde(default)]
    pub allocated_amount: Money,
    /// Amount spent in the category.
    #[serde(default)]
    pub spent_amount: Money,
    /// `allocated - spent`; negative when over budget.
    #[serde(default)]
    pub remaining_amount: Money,
    /// Spent as a percentage of allocated.
    #[serde(default)]
    pub percentage_used: Decimal,
    /// Whether spending exceeds the allocation.
    #[serde(default)]
    pub over_budget: bool,
}

#[derive(Debug, Deserialize)]
struct VsActualResponse {
    #[serde(default)]
    categories: Vec<CategoryVsActual>,
}

impl ApiClient {
    /// Creates a budget from the draft.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` if the backend rejects the budget.
    pub async fn create_budget(&self, draft: &BudgetDraft) -> ClientResult<CreatedBudget> {
        let created: CreatedBudgetResponse = self
            .post_json(BUDGETS, &CreateBudgetRequest::from(draft))
            .await?;
        info!(budget_id = %created.budget_id, "Budget stored");

        Ok(CreatedBudget {
            budget_id: created.budget_id,
            budget_name: created.budget_name.unwrap_or_else(|| draft.name.clone()),
        })
    }

    /// Adds a category allocation to an existing budget.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` if the backend rejects the allocation.
    pub async fn create_allocation(
        &self,
        budget_id: BudgetId,
        allocation: &CategoryAllocationDraft,
    ) -> ClientResult<()> {
        let body = CreateAllocationRequest {
            category_display_name: &allocation.display_name,
            allocated_amount: allocation.amount,
        };
        self.post_unit(&format!("/budgets/{budget_id}/categories"), &body)
            .await
    }

    /// Lists budgets.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` if the request fails or the body is malformed.
    pub async fn list_budgets(&self, filter: &BudgetFilter) -> ClientResult<Vec<BudgetSummary>> {
        let response: BudgetListResponse = self.get_json(BUDGETS, &filter.query_pairs()).await?;
        debug!(count = response.budgets.len(), "Fetched budgets");
        Ok(response.budgets)
    }

    /// Compares allocations with actual spending for one budget.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` if the budget does not exist or the request fails.
    pub async fn budget_vs_actual(
        &self,
        budget_id: BudgetId,
    ) -> ClientResult<Vec<CategoryVsActual>> {
        let response: VsActualResponse = self
            .get_json(&format!("/budgets/{budget_id}/vs-actual"), &[])
            .await?;
        Ok(response.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_create_budget_body_shape() {
        let draft = BudgetDraft {
            name: "July".into(),
            period_type: PeriodType::Monthly,
            total_amount: Money::new(dec!(1000.00)),
            period_start: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            period_end: None,
        };

        assert_eq!(
            serde_json::to_value(CreateBudgetRequest::from(&draft)).unwrap(),
            json!({
                "budget_name": "July",
                "budget_type": "monthly",
                "amount": "1000.00",
                "period_start": "2025-07-01",
                "period_end": null
            })
        );
    }

    #[test]
    fn test_created_budget_accepts_either_id_key() {
        let id = BudgetId::new();
        let upper: CreatedBudgetResponse =
            serde_json::from_value(json!({"BudgetID": id.to_string(), "BudgetName": "July"}))
                .unwrap();
        let lower: CreatedBudgetResponse =
            serde_json::from_value(json!({"budget_id": id.to_string()})).unwrap();

        assert_eq!(upper.budget_id, id);
        assert_eq!(upper.budget_name.as_deref(), Some("July"));
        assert_eq!(lower.budget_id, id);
        assert!(lower.budget_name.is_none());
    }

    #[test]
    fn test_filter_query_pairs() {
        let filter = BudgetFilter {
            budget_type: Some(PeriodType::Weekly),
            ..BudgetFilter::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("skip", "0".to_string()),
                ("limit", "10".to_string()),
                ("sort_by", "CreatedAt".to_string()),
                ("sort_order", "desc".to_string()),
                ("budget_type", "weekly".to_string()),
            ]
        );
    }

    #[test]
    fn test_summary_accepts_numeric_amounts() {
        let summary: BudgetSummary = serde_json::from_value(json!({
            "BudgetID": BudgetId::new().to_string(),
            "budget_name": "July",
            "budget_type": "monthly",
            "amount": 1000.5,
            "period_start": "2025-07-01",
            "period_end": "2025-07-31",
            "total_spent": "250.00"
        }))
        .unwrap();

        assert_eq!(summary.amount, Money::new(dec!(1000.5)));
        assert_eq!(summary.total_spent, Some(Money::new(dec!(250))));
        assert!(summary.is_active);
    }
}
