//! Wizard steps.
//!
//! Each step carries only the data it needs. The category step owns the
//! fetched categories, the allocation list, and the inline new-category form.

use serde::Serialize;
use std::fmt;

use crate::budget::{AllocationList, BudgetDraft, Category, CategoryType};

/// Placeholder shown in the category picker when there is nothing to pick.
pub const NO_CATEGORY_FOUND: &str = "No category found";

/// Step discriminant, for display and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Budget basics.
    BasicInfo,
    /// Category allocations.
    Categories,
}

impl StepKind {
    /// Returns the label shown in the step header.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Info",
            Self::Categories => "Categories",
        }
    }

    /// Returns the 1-based position of the step.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::BasicInfo => 1,
            Self::Categories => 2,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The budget basics step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfo {
    /// Draft being edited.
    pub draft: BudgetDraft,
}

/// The category allocation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStep {
    /// Draft carried over from the basics step.
    pub draft: BudgetDraft,
    /// Categories fetched on entry.
    pub categories: Vec<Category>,
    /// Allocations added so far.
    pub allocations: AllocationList,
    /// Inline "create new category" form, when open.
    pub new_category: Option<NewCategoryForm>,
}

impl CategoryStep {
    /// Enters the category step with the given draft and fetched categories.
    #[must_use]
    pub fn new(draft: BudgetDraft, categories: Vec<Category>) -> Self {
        Self {
            draft,
            categories,
            allocations: AllocationList::new(),
            new_category: None,
        }
    }

    /// Resolves a picker selection against the fetched categories.
    ///
    /// Matches a category ID exactly, or a display name ignoring case.
    #[must_use]
    pub fn resolve(&self, selection: &str) -> Option<&Category> {
        let selection = selection.trim();
        if selection.is_empty() {
            return None;
        }
        self.categories
            .iter()
            .find(|c| c.category_id.to_string() == selection)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|c| c.display_name.eq_ignore_ascii_case(selection))
            })
    }

    /// Options shown in the category picker.
    #[must_use]
    pub fn options(&self) -> Vec<CategoryOption<'_>> {
        CategoryOption::list(&self.categories)
    }
}

/// One entry of the category picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOption<'a> {
    /// Nothing to select.
    Placeholder,
    /// A selectable category.
    Category(&'a Category),
}

impl<'a> CategoryOption<'a> {
    /// Picker entries for `categories`, or only the placeholder when empty.
    #[must_use]
    pub fn list(categories: &'a [Category]) -> Vec<Self> {
        if categories.is_empty() {
            return vec![Self::Placeholder];
        }
        categories.iter().map(Self::Category).collect()
    }

    /// Text shown for the option.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Placeholder => NO_CATEGORY_FOUND,
            Self::Category(c) => &c.display_name,
        }
    }

    /// Returns true if selecting this option can produce an allocation.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        matches!(self, Self::Category(_))
    }
}

/// Inline form for creating a category without leaving the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCategoryForm {
    /// Category name.
    pub name: String,
    /// Category type.
    pub category_type: CategoryType,
}

/// The wizard's current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStep {
    /// Collecting budget basics.
    BasicInfo(BasicInfo),
    /// Collecting category allocations.
    Categories(CategoryStep),
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::BasicInfo(BasicInfo::default())
    }
}

impl WizardStep {
    /// Returns the step discriminant.
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        match self {
            Self::BasicInfo(_) => StepKind::BasicInfo,
            Self::Categories(_) => StepKind::Categories,
        }
    }

    /// Returns the draft, whichever step holds it.
    #[must_use]
    pub const fn draft(&self) -> &BudgetDraft {
        match self {
            Self::BasicInfo(step) => &step.draft,
            Self::Categories(step) => &step.draft,
        }
    }
}
