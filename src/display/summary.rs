//! Spending summary formatting
//!
//! Formats category and period spending summaries for terminal display.

use crate::models::format_cents;
use crate::services::{CategorySpendingSummary, PeriodSpendingSummary};

use super::transaction::format_transaction_register;

/// Format a by-categories summary
pub fn format_category_summary(summary: &CategorySpendingSummary, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format_transaction_register(&summary.transactions));
    output.push('\n');

    output.push_str("Expense by category:\n");
    for total in &summary.by_category {
        output.push_str(&format!(
            "  {:20} {}\n",
            total.category_id,
            format_cents(total.total_expense_cents, currency)
        ));
    }

    output.push_str(&format!(
        "Total expense: {}\n",
        format_cents(summary.total_expense_cents, currency)
    ));

    output
}

/// Format a by-period summary
pub fn format_period_summary(summary: &PeriodSpendingSummary, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Period: {} .. {}\n\n",
        summary.start_at.format("%Y-%m-%d %H:%M:%S"),
        summary.end_at.format("%Y-%m-%d %H:%M:%S")
    ));

    output.push_str(&format_transaction_register(&summary.transactions));
    output.push('\n');

    if !summary.by_category.is_empty() {
        output.push_str("Expense by category:\n");
        for total in &summary.by_category {
            let label = total.category_id.as_deref().unwrap_or("(uncategorized)");
            output.push_str(&format!(
                "  {:20} {}\n",
                label,
                format_cents(total.total_expense_cents, currency)
            ));
        }
    }

    output.push_str(&format!(
        "Total expense: {}\n",
        format_cents(summary.total_expense_cents, currency)
    ));

    output
}
