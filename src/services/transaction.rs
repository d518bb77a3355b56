//! Transaction service
//!
//! Provides business logic for recording and querying transactions,
//! including category and period spending summaries.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, Transaction, TransactionId, TransactionKind};
use crate::storage::{Storage, TransactionRepository};

/// Input for recording a new transaction
///
/// Kind and amount arrive as user-supplied strings; the service owns their
/// validation so every entry point gets the same error messages.
#[derive(Debug, Clone)]
pub struct RecordTransactionInput {
    pub user_id: String,
    /// "expense" or "income"
    pub kind: String,
    /// Decimal amount, e.g. "10.50"
    pub amount: String,
    /// 3-letter currency code
    pub currency: String,
    pub occurred_at: DateTime<Utc>,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
    pub description: Option<String>,
}

/// Per-category expense total for a category query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category_id: String,
    /// Total expense in minor units; zero when nothing was spent
    pub total_expense_cents: i64,
}

/// Result of a by-categories query
#[derive(Debug, Clone)]
pub struct CategorySpendingSummary {
    pub transactions: Vec<Transaction>,
    pub total_expense_cents: i64,
    /// One entry per requested category, in request order
    pub by_category: Vec<CategoryTotal>,
}

/// Per-category expense total for a period query
///
/// `category_id` of `None` aggregates uncategorized spending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotal {
    pub category_id: Option<String>,
    pub total_expense_cents: i64,
}

/// Result of a by-period query
#[derive(Debug, Clone)]
pub struct PeriodSpendingSummary {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
    pub total_expense_cents: i64,
    /// Categories in order of first appearance in the listing
    pub by_category: Vec<PeriodTotal>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    repo: &'a dyn TransactionRepository,
    audit: Option<&'a AuditLogger>,
}

impl<'a> TransactionService<'a> {
    /// Create a service over application storage (with audit logging)
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            repo: &storage.transactions,
            audit: Some(&storage.audit),
        }
    }

    /// Create a service over a bare repository (no audit logging)
    pub fn with_repository(repo: &'a dyn TransactionRepository) -> Self {
        Self { repo, audit: None }
    }

    /// Record a new transaction
    pub fn record_transaction(&self, input: RecordTransactionInput) -> ExpenseResult<Transaction> {
        let kind: TransactionKind = input
            .kind
            .parse()
            .map_err(|e: crate::models::UnsupportedKind| ExpenseError::Validation(e.to_string()))?;

        let money = Money::parse(&input.amount, &input.currency)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let txn = Transaction::create(
            input.user_id,
            kind,
            money,
            input.occurred_at,
            input.category_id,
            input.account_id,
            input.description,
        )
        .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.repo.add(txn.clone())?;

        if let Some(audit) = self.audit {
            audit.log(&AuditEntry::create(
                EntityType::Transaction,
                txn.id.to_string(),
                txn.description.clone(),
                &txn,
            ))?;
        }

        Ok(txn)
    }

    /// Get a single transaction, scoped to its owner
    ///
    /// An unknown id and an id owned by another user are indistinguishable
    /// to the caller.
    pub fn get_transaction(&self, user_id: &str, identifier: &str) -> ExpenseResult<Transaction> {
        let id: TransactionId = identifier
            .parse()
            .map_err(|_| ExpenseError::transaction_not_found(identifier))?;

        match self.repo.get(id)? {
            Some(txn) if txn.user_id == user_id => Ok(txn),
            _ => Err(ExpenseError::transaction_not_found(identifier)),
        }
    }

    /// List all of a user's transactions, newest recorded first
    pub fn list_transactions(&self, user_id: &str) -> ExpenseResult<Vec<Transaction>> {
        self.repo.list_by_user(user_id)
    }

    /// Transactions and expense totals for a set of categories
    ///
    /// Requested ids are de-duplicated preserving first occurrence. Every
    /// requested category appears in the totals, zero when unused.
    pub fn transactions_by_categories(
        &self,
        user_id: &str,
        category_ids: &[String],
    ) -> ExpenseResult<CategorySpendingSummary> {
        let mut seen = HashSet::new();
        let unique_ids: Vec<String> = category_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();

        if unique_ids.is_empty() {
            return Err(ExpenseError::Validation(
                "category_ids must not be empty".into(),
            ));
        }

        let transactions = self.repo.list_by_user_and_categories(user_id, &unique_ids)?;

        let mut totals: HashMap<&str, i64> =
            unique_ids.iter().map(|id| (id.as_str(), 0)).collect();
        let mut total_expense_cents = 0;

        for txn in &transactions {
            if !txn.is_expense() {
                continue;
            }
            total_expense_cents += txn.money.cents();
            if let Some(cat) = txn.category_id.as_deref() {
                if let Some(total) = totals.get_mut(cat) {
                    *total += txn.money.cents();
                }
            }
        }

        let by_category = unique_ids
            .iter()
            .map(|id| CategoryTotal {
                category_id: id.clone(),
                total_expense_cents: totals[id.as_str()],
            })
            .collect();

        Ok(CategorySpendingSummary {
            transactions,
            total_expense_cents,
            by_category,
        })
    }

    /// Transactions and expense totals within an inclusive time range
    ///
    /// Uncategorized spending aggregates under a `None` category.
    pub fn transactions_for_period(
        &self,
        user_id: &str,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> ExpenseResult<PeriodSpendingSummary> {
        if start_at > end_at {
            return Err(ExpenseError::Validation(
                "start_at must be before or equal to end_at".into(),
            ));
        }

        let transactions = self.repo.list_by_user_and_period(user_id, start_at, end_at)?;

        let mut total_expense_cents = 0;
        let mut order: Vec<Option<String>> = Vec::new();
        let mut totals: HashMap<Option<String>, i64> = HashMap::new();

        for txn in &transactions {
            if !txn.is_expense() {
                continue;
            }
            total_expense_cents += txn.money.cents();

            let key = txn.category_id.clone();
            if !totals.contains_key(&key) {
                order.push(key.clone());
            }
            *totals.entry(key).or_insert(0) += txn.money.cents();
        }

        let by_category = order
            .into_iter()
            .map(|key| {
                let total = totals[&key];
                PeriodTotal {
                    category_id: key,
                    total_expense_cents: total,
                }
            })
            .collect();

        Ok(PeriodSpendingSummary {
            start_at,
            end_at,
            transactions,
            total_expense_cents,
            by_category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonTransactionRepository;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn repo(dir: &TempDir) -> JsonTransactionRepository {
        JsonTransactionRepository::new(dir.path().join("transactions.json"))
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap()
    }

    fn record(
        service: &TransactionService<'_>,
        kind: &str,
        amount: &str,
        category: Option<&str>,
        occurred_at: DateTime<Utc>,
    ) -> Transaction {
        service
            .record_transaction(RecordTransactionInput {
                user_id: "u1".into(),
                kind: kind.into(),
                amount: amount.into(),
                currency: "RUB".into(),
                occurred_at,
                category_id: category.map(String::from),
                account_id: None,
                description: None,
            })
            .unwrap()
    }

    #[test]
    fn test_record_transaction_success() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        let txn = service
            .record_transaction(RecordTransactionInput {
                user_id: "u1".into(),
                kind: "expense".into(),
                amount: "10.50".into(),
                currency: "RUB".into(),
                occurred_at: at(22, 12),
                category_id: Some("food".into()),
                account_id: None,
                description: Some("lunch".into()),
            })
            .unwrap();

        assert_eq!(txn.user_id, "u1");
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.money.cents(), 1050);
        assert_eq!(repo.get(txn.id).unwrap().unwrap(), txn);
    }

    #[test]
    fn test_record_transaction_invalid_amount() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        let err = service
            .record_transaction(RecordTransactionInput {
                user_id: "u1".into(),
                kind: "expense".into(),
                amount: "0".into(),
                currency: "RUB".into(),
                occurred_at: at(22, 12),
                category_id: None,
                account_id: None,
                description: None,
            })
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Amount must be greater than 0"));
    }

    #[test]
    fn test_record_transaction_unsupported_kind() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        let err = service
            .record_transaction(RecordTransactionInput {
                user_id: "u1".into(),
                kind: "transfer".into(),
                amount: "10".into(),
                currency: "RUB".into(),
                occurred_at: at(22, 12),
                category_id: None,
                account_id: None,
                description: None,
            })
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err
            .to_string()
            .contains("Unsupported transaction type: transfer"));
    }

    #[test]
    fn test_get_transaction_not_found() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        let err = service.get_transaction("u1", "missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_transaction_scoped_to_owner() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        let txn = record(&service, "expense", "10", Some("food"), at(22, 12));

        // Owner sees it
        let found = service.get_transaction("u1", &txn.id.to_string()).unwrap();
        assert_eq!(found.id, txn.id);

        // Another user gets not-found, not forbidden
        let err = service
            .get_transaction("u2", &txn.id.to_string())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_transactions_newest_first() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        let first = record(&service, "expense", "10", None, at(1, 0));
        let second = record(&service, "income", "20", None, at(2, 0));

        let listed = service.list_transactions("u1").unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[test]
    fn test_by_categories_totals() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        record(&service, "expense", "10.00", Some("food"), at(1, 0));
        record(&service, "expense", "5.50", Some("food"), at(2, 0));
        record(&service, "expense", "3.00", Some("transport"), at(3, 0));
        // Income in a requested category must not count as expense
        record(&service, "income", "100.00", Some("food"), at(4, 0));
        // Unrequested category is excluded entirely
        record(&service, "expense", "7.00", Some("rent"), at(5, 0));

        let summary = service
            .transactions_by_categories(
                "u1",
                &["food".to_string(), "transport".to_string(), "games".to_string()],
            )
            .unwrap();

        // food x2 + transport + income(food)
        assert_eq!(summary.transactions.len(), 4);
        assert_eq!(summary.total_expense_cents, 1850);
        assert_eq!(
            summary.by_category,
            vec![
                CategoryTotal {
                    category_id: "food".into(),
                    total_expense_cents: 1550
                },
                CategoryTotal {
                    category_id: "transport".into(),
                    total_expense_cents: 300
                },
                CategoryTotal {
                    category_id: "games".into(),
                    total_expense_cents: 0
                },
            ]
        );
    }

    #[test]
    fn test_by_categories_deduplicates_request() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        record(&service, "expense", "10.00", Some("food"), at(1, 0));

        let summary = service
            .transactions_by_categories("u1", &["food".to_string(), "food".to_string()])
            .unwrap();

        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].total_expense_cents, 1000);
    }

    #[test]
    fn test_by_categories_rejects_empty() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        let err = service.transactions_by_categories("u1", &[]).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("category_ids must not be empty"));
    }

    #[test]
    fn test_for_period_totals_and_uncategorized() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        record(&service, "expense", "10.00", Some("food"), at(10, 0));
        record(&service, "expense", "2.00", None, at(11, 0));
        record(&service, "income", "50.00", None, at(12, 0));
        // Outside the period
        record(&service, "expense", "99.00", Some("food"), at(20, 0));

        let summary = service
            .transactions_for_period("u1", at(9, 0), at(15, 0))
            .unwrap();

        assert_eq!(summary.transactions.len(), 3);
        assert_eq!(summary.total_expense_cents, 1200);

        let uncategorized = summary
            .by_category
            .iter()
            .find(|t| t.category_id.is_none())
            .unwrap();
        assert_eq!(uncategorized.total_expense_cents, 200);

        let food = summary
            .by_category
            .iter()
            .find(|t| t.category_id.as_deref() == Some("food"))
            .unwrap();
        assert_eq!(food.total_expense_cents, 1000);
    }

    #[test]
    fn test_for_period_rejects_inverted_range() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        let err = service
            .transactions_for_period("u1", at(15, 0), at(9, 0))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err
            .to_string()
            .contains("start_at must be before or equal to end_at"));
    }

    #[test]
    fn test_for_period_equal_bounds_allowed() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let service = TransactionService::with_repository(&repo);

        record(&service, "expense", "10.00", None, at(10, 0));

        let summary = service
            .transactions_for_period("u1", at(10, 0), at(10, 0))
            .unwrap();
        assert_eq!(summary.transactions.len(), 1);
    }

    #[test]
    fn test_record_writes_audit_entry() {
        let dir = TempDir::new().unwrap();
        let paths = crate::config::ExpensePaths::with_base_dir(dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let service = TransactionService::new(&storage);

        service
            .record_transaction(RecordTransactionInput {
                user_id: "u1".into(),
                kind: "expense".into(),
                amount: "10".into(),
                currency: "RUB".into(),
                occurred_at: at(22, 12),
                category_id: None,
                account_id: None,
                description: Some("lunch".into()),
            })
            .unwrap();

        let entries = storage.audit.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_name.as_deref(), Some("lunch"));
    }
}
