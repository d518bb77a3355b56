//! JSON export functionality

use std::io::Write;

use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Transaction;

/// Wrapper document written around exported transactions
#[derive(Serialize)]
struct ExportDocument<'a> {
    exported_at: chrono::DateTime<chrono::Utc>,
    transaction_count: usize,
    transactions: &'a [Transaction],
}

/// Export transactions as a pretty-printed JSON document
pub fn export_transactions_json<W: Write>(
    transactions: &[Transaction],
    mut writer: W,
) -> ExpenseResult<()> {
    let document = ExportDocument {
        exported_at: chrono::Utc::now(),
        transaction_count: transactions.len(),
        transactions,
    };

    serde_json::to_writer_pretty(&mut writer, &document)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
