//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display.

use tabled::{Table, Tabled};

use crate::models::Transaction;

/// A single row of the transaction register
#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Transaction> for RegisterRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.occurred_at.format("%Y-%m-%d").to_string(),
            kind: txn.kind.to_string(),
            amount: txn.money.to_string(),
            category: txn.category_id.clone().unwrap_or_default(),
            description: truncate(txn.description.as_deref().unwrap_or(""), 40),
        }
    }
}

/// Format a list of transactions as a register table
pub fn format_transaction_register(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<RegisterRow> = transactions.iter().map(RegisterRow::from).collect();
    format!("{}\n", Table::new(rows))
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("User:        {}\n", txn.user_id));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.money));
    output.push_str(&format!(
        "Occurred:    {}\n",
        txn.occurred_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "Recorded:    {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    match &txn.category_id {
        Some(category) => output.push_str(&format!("Category:    {}\n", category)),
        None => output.push_str("Category:    (uncategorized)\n"),
    }

    if let Some(account) = &txn.account_id {
        output.push_str(&format!("Account:     {}\n", account));
    }

    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output
}

/// Truncate a string for column display
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
