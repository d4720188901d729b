//! Category allocation list and its running totals.

use finwise_shared::types::Money;
use rust_decimal::Decimal;
use serde::Serialize;

use super::types::CategoryAllocationDraft;

/// Outcome of an add request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddAllocation {
    /// The allocation was appended at the given index.
    Added(usize),
    /// No category name was given; the list is unchanged.
    Ignored,
}

/// Ordered, mutable list of allocation drafts.
///
/// Entry order reflects the order the user added them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationList {
    entries: Vec<CategoryAllocationDraft>,
}

impl AllocationList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends `draft` if it carries a non-blank display name.
    pub fn add(&mut self, mut draft: CategoryAllocationDraft) -> AddAllocation {
        let name = draft.display_name.trim();
        if name.is_empty() {
            return AddAllocation::Ignored;
        }
        if name.len() != draft.display_name.len() {
            draft.display_name = name.to_string();
        }
        self.entries.push(draft);
        AddAllocation::Added(self.entries.len() - 1)
    }

    /// Removes the entry at `index`. Out-of-range indexes leave the list unchanged.
    pub fn remove(&mut self, index: usize) -> Option<CategoryAllocationDraft> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CategoryAllocationDraft] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all allocated amounts, saturating at [`Money::MAX`].
    #[must_use]
    pub fn allocated(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Running totals against `total`.
    #[must_use]
    pub fn summary(&self, total: Money) -> AllocationSummary {
        let exact = self
            .entries
            .iter()
            .try_fold(Money::ZERO, |sum, e| sum.checked_add(e.amount));
        let mut summary = AllocationSummary::new(total, exact.unwrap_or_else(|| self.allocated()));
        summary.overflowed |= exact.is_none();
        summary
    }
}

impl From<Vec<CategoryAllocationDraft>> for AllocationList {
    fn from(entries: Vec<CategoryAllocationDraft>) -> Self {
        let mut list = Self::new();
        for entry in entries {
            list.add(entry);
        }
        list
    }
}

/// Totals shown beside the allocation list.
///
/// `remaining` may go negative: over-allocation is reported, not blocked.
/// Amounts too large to total exactly saturate and set `overflowed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationSummary {
    /// Budget total.
    pub total: Money,
    /// Sum of allocations.
    pub allocated: Money,
    /// `total - allocated`.
    pub remaining: Money,
    /// `allocated / total * 100`, or zero when `total <= 0`.
    pub percent_used: Decimal,
    /// Set when a figure above hit the `Decimal` range and was saturated.
    pub overflowed: bool,
}

impl AllocationSummary {
    /// Computes the summary for a total and an allocated sum.
    #[must_use]
    pub fn new(total: Money, allocated: Money) -> Self {
        let remaining = total.checked_sub(allocated);
        let percent_used = allocated.percent_of(total);
        Self {
            total,
            allocated,
            remaining: remaining.unwrap_or(total - allocated),
            percent_used: percent_used.unwrap_or(Decimal::MAX),
            overflowed: remaining.is_none() || percent_used.is_none(),
        }
    }

    /// Returns true if more has been allocated than the budget holds.
    #[must_use]
    pub fn is_over_allocated(&self) -> bool {
        self.remaining.is_negative()
    }
}
