//! Budget data types.

use chrono::{NaiveDate, Utc};
use finwise_shared::types::{BudgetId, Money, PageWindow, SortOrder, UserCategoryId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Budget period classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Budget resets every month.
    #[default]
    Monthly,
    /// Budget resets every week.
    Weekly,
    /// Budget resets every year.
    Yearly,
}

impl PeriodType {
    /// All period types, in the order they are offered to the user.
    pub const ALL: [Self; 3] = [Self::Monthly, Self::Weekly, Self::Yearly];

    /// Returns the string representation used by the backend.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
            Self::Yearly => "yearly",
        }
    }

    /// Parses a period type, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "weekly" => Some(Self::Weekly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Money coming in.
    Income,
    /// Money going out.
    #[default]
    Expense,
}

impl CategoryType {
    /// Returns the string representation used by the backend.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parses a category type, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget metadata collected by the basics step.
///
/// Lives only in wizard memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetDraft {
    /// Budget name.
    pub name: String,
    /// Period type.
    pub period_type: PeriodType,
    /// Total amount to distribute across categories.
    pub total_amount: Money,
    /// First day of the budget period.
    pub period_start: NaiveDate,
    /// Last day of the budget period, if bounded.
    pub period_end: Option<NaiveDate>,
}

impl Default for BudgetDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            period_type: PeriodType::default(),
            total_amount: Money::ZERO,
            period_start: Utc::now().date_naive(),
            period_end: None,
        }
    }
}

/// A category as returned by the backend for the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// User category ID.
    pub category_id: UserCategoryId,
    /// Name shown to the user.
    pub display_name: String,
    /// Category type.
    pub category_type: CategoryType,
}

/// A portion of the budget earmarked for one category, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAllocationDraft {
    /// Selected category.
    ///
    /// The wizard always fills this in, since it only accepts fetched
    /// categories. The allocation endpoint identifies the category by
    /// `display_name` alone, so drafts built elsewhere may leave it empty.
    pub category_id: Option<UserCategoryId>,
    /// Category name sent to the backend.
    pub display_name: String,
    /// Allocated amount.
    pub amount: Money,
}

impl CategoryAllocationDraft {
    /// Creates an allocation draft.
    #[must_use]
    pub fn new(
        category_id: Option<UserCategoryId>,
        display_name: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            category_id,
            display_name: display_name.into(),
            amount,
        }
    }
}

/// Input for creating a user category from the inline form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Category name.
    pub name: String,
    /// Category type.
    pub category_type: CategoryType,
}

/// The part of a created budget the wizard needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBudget {
    /// ID assigned by the backend.
    pub budget_id: BudgetId,
    /// Budget name as stored.
    pub budget_name: String,
}

/// Query parameters for listing the user's categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryQuery {
    /// Category type filter.
    pub category_type: CategoryType,
    /// Pagination window.
    pub window: PageWindow,
    /// Only return active categories.
    pub is_active: bool,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl CategoryQuery {
    /// Upper bound on categories offered in the allocation picker.
    pub const PICKER_LIMIT: u32 = 99;

    /// Query used when the wizard enters the category step.
    #[must_use]
    pub const fn expense_picker() -> Self {
        Self {
            category_type: CategoryType::Expense,
            window: PageWindow::first(Self::PICKER_LIMIT),
            is_active: true,
            sort_order: SortOrder::Desc,
        }
    }

    /// Returns the query-string pairs in the order the backend documents them.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("category_type", self.category_type.as_str().to_string()),
            ("skip", self.window.skip.to_string()),
            ("limit", self.window.limit.to_string()),
            ("is_active", self.is_active.to_string()),
            ("sort_order", self.sort_order.as_str().to_string()),
        ]
    }
}
