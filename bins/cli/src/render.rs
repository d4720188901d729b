//! Plain-text rendering for terminal output.

use std::fmt::Write;

use finwise_client::{BudgetSummary, CategoryVsActual};
use finwise_core::budget::{AllocationSummary, CategoryAllocationDraft};
use finwise_core::wizard::{Alert, CategoryOption};

/// Numbered category picker.
pub fn category_options(options: &[CategoryOption<'_>]) -> String {
    let mut out = String::from("Categories:\n");
    for (i, option) in options.iter().enumerate() {
        if option.is_selectable() {
            let _ = writeln!(out, "  {:>2}. {}", i + 1, option.label());
        } else {
            let _ = writeln!(out, "      ({})", option.label());
        }
    }
    out
}

/// Allocation list followed by the running totals.
pub fn allocations(entries: &[CategoryAllocationDraft], summary: &AllocationSummary) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        out.push_str("No categories allocated yet.\n");
    }
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<24} ${:>12}",
            i + 1,
            entry.display_name,
            entry.amount.to_string()
        );
    }
    out.push_str(&totals(summary));
    out
}

/// One-line totals.
pub fn totals(summary: &AllocationSummary) -> String {
    let mut line = format!(
        "Total ${}  Allocated ${}  Remaining ${}  Used {}%",
        summary.total,
        summary.allocated,
        summary.remaining,
        summary.percent_used.normalize()
    );
    if summary.is_over_allocated() {
        line.push_str("  (over-allocated)");
    }
    if summary.overflowed {
        line.push_str("  (amounts too large to total exactly)");
    }
    line.push('\n');
    line
}

/// Alert text, marked when it reports a problem.
pub fn alert(alert: &Alert) -> String {
    if alert.is_error() {
        format!("! {alert}")
    } else {
        alert.to_string()
    }
}

/// Budget list table.
pub fn budget_table(budgets: &[BudgetSummary]) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }
    let mut out = format!(
        "{:<36}  {:<20} {:<8} {:>12} {:>12}  {:<23} {}\n",
        "ID", "Name", "Period", "Amount", "Spent", "Dates", "Active"
    );
    for budget in budgets {
        let spent = budget
            .total_spent
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        let end = budget
            .period_end
            .map_or_else(|| "open".to_string(), |d| d.to_string());
        let dates = format!("{}..{end}", budget.period_start);
        let _ = writeln!(
            out,
            "{:<36}  {:<20} {:<8} {:>12} {:>12}  {:<23} {}",
            budget.budget_id.to_string(),
            budget.budget_name,
            budget.budget_type.as_str(),
            budget.amount.to_string(),
            spent,
            dates,
            if budget.is_active { "yes" } else { "no" }
        );
    }
    out
}

/// Allocated versus actual table.
pub fn vs_actual_table(rows: &[CategoryVsActual]) -> String {
    if rows.is_empty() {
        return "This budget has no category allocations.\n".to_string();
    }
    let mut out = format!(
        "{:<24} {:>12} {:>12} {:>12} {:>8}\n",
        "Category", "Allocated", "Spent", "Remaining", "Used"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<24} {:>12} {:>12} {:>12} {:>7}%{}",
            row.category_name,
            row.allocated_amount.to_string(),
            row.spent_amount.to_string(),
            row.remaining_amount.to_string(),
            row.percentage_used.round_dp(0).to_string(),
            if row.over_budget { "  over budget" } else { "" }
        );
    }
    out
}
