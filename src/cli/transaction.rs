//! Transaction CLI commands
//!
//! Implements CLI commands for recording and querying transactions.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_category_summary, format_period_summary, format_transaction_details,
    format_transaction_register,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::{RecordTransactionInput, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Transaction kind: "expense" or "income"
        kind: String,
        /// Decimal amount, e.g. "10.50"
        amount: String,
        /// Currency code (defaults to the configured currency)
        #[arg(short = 'u', long)]
        currency: Option<String>,
        /// Category identifier, e.g. "food"
        #[arg(short, long)]
        category: Option<String>,
        /// Account identifier, e.g. "card"
        #[arg(short, long)]
        account: Option<String>,
        /// Description (max 500 characters)
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// When it happened: "YYYY-MM-DD" or RFC 3339, defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List all transactions, newest first
    List,
    /// Show one transaction
    Show {
        /// Transaction ID
        id: String,
    },
    /// Transactions and expense totals for one or more categories
    ByCategories {
        /// Category identifiers (at least one)
        categories: Vec<String>,
    },
    /// Transactions and expense totals within a time range
    ByPeriod {
        /// Range start: "YYYY-MM-DD" or RFC 3339
        #[arg(long)]
        from: String,
        /// Range end: "YYYY-MM-DD" or RFC 3339
        #[arg(long)]
        to: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> ExpenseResult<()> {
    let service = TransactionService::new(storage);
    let user_id = settings.default_user.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            currency,
            category,
            account,
            description,
            date,
        } => {
            let occurred_at = match date {
                Some(raw) => parse_timestamp(&raw)?,
                None => Utc::now(),
            };

            let txn = service.record_transaction(RecordTransactionInput {
                user_id: user_id.to_string(),
                kind,
                amount,
                currency: currency.unwrap_or_else(|| settings.default_currency.clone()),
                occurred_at,
                category_id: category,
                account_id: account,
                description,
            })?;

            println!("Recorded {} {}", txn.kind, txn.money);
            println!("ID: {}", txn.id);
        }
        TransactionCommands::List => {
            let transactions = service.list_transactions(user_id)?;
            print!("{}", format_transaction_register(&transactions));
        }
        TransactionCommands::Show { id } => {
            let txn = service.get_transaction(user_id, &id)?;
            print!("{}", format_transaction_details(&txn));
        }
        TransactionCommands::ByCategories { categories } => {
            let summary = service.transactions_by_categories(user_id, &categories)?;
            print!(
                "{}",
                format_category_summary(&summary, &settings.default_currency)
            );
        }
        TransactionCommands::ByPeriod { from, to } => {
            let start_at = parse_timestamp(&from)?;
            let end_at = parse_timestamp(&to)?;
            let summary = service.transactions_for_period(user_id, start_at, end_at)?;
            print!(
                "{}",
                format_period_summary(&summary, &settings.default_currency)
            );
        }
    }

    Ok(())
}

/// Parse a user-supplied timestamp
///
/// Accepts a bare date ("2026-01-22", midnight UTC) or a full RFC 3339
/// timestamp ("2026-01-22T12:00:00Z").
pub fn parse_timestamp(raw: &str) -> ExpenseResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
        return Ok(DateTime::from_naive_utc_and_offset(midnight, Utc));
    }

    Err(ExpenseError::Validation(format!(
        "Invalid date '{}'. Use YYYY-MM-DD or RFC 3339 (e.g. 2026-01-22T12:00:00Z)",
        raw
    )))
}
