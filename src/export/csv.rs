//! CSV export functionality
//!
//! Exports a user's transactions to CSV.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Transaction;

/// Export transactions to CSV
///
/// Columns: id, kind, amount, currency, occurred_at, category, account,
/// description, created_at.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "id",
            "kind",
            "amount",
            "currency",
            "occurred_at",
            "category_id",
            "account_id",
            "description",
            "created_at",
        ])
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    for txn in transactions {
        csv_writer
            .write_record([
                txn.id.to_string(),
                txn.kind.to_string(),
                format!("{}.{:02}", txn.money.units(), txn.money.subunits()),
                txn.money.currency().to_string(),
                txn.occurred_at.to_rfc3339(),
                txn.category_id.clone().unwrap_or_default(),
                txn.account_id.clone().unwrap_or_default(),
                txn.description.clone().unwrap_or_default(),
                txn.created_at.to_rfc3339(),
            ])
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, Money, TransactionKind};
    use chrono::{TimeZone, Utc};

    fn txn(description: Option<&str>) -> Transaction {
        Transaction::create(
            "u1",
            TransactionKind::Expense,
            Money::new(1050, Currency::new("RUB").unwrap()).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 22, 12, 0, 0).unwrap(),
            Some("food".into()),
            None,
            description.map(String::from),
        )
        .unwrap()
    }

    #[test]
    fn test_export_header_and_rows() {
        let transactions = vec![txn(Some("lunch"))];
        let mut buffer = Vec::new();

        export_transactions_csv(&transactions, &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,kind,amount,currency,occurred_at,category_id,account_id,description,created_at"
        );

        let row = lines.next().unwrap();
        assert!(row.contains("expense"));
        assert!(row.contains("10.50"));
        assert!(row.contains("RUB"));
        assert!(row.contains("food"));
        assert!(row.contains("lunch"));
    }

    #[test]
    fn test_export_quotes_embedded_commas() {
        let transactions = vec![txn(Some("lunch, with a friend"))];
        let mut buffer = Vec::new();

        export_transactions_csv(&transactions, &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("\"lunch, with a friend\""));
    }

    #[test]
    fn test_export_empty_is_header_only() {
        let mut buffer = Vec::new();
        export_transactions_csv(&[], &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 1);
    }
}
