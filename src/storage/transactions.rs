//! Transaction repository for JSON storage
//!
//! Defines the repository port used by the service layer and a JSON-file
//! implementation that keeps an indexed in-memory copy, persisted with
//! atomic writes.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Repository port for transaction persistence
///
/// The service layer depends on this trait; production code uses
/// [`JsonTransactionRepository`], tests may substitute an in-memory map.
pub trait TransactionRepository {
    /// Persist a new transaction
    fn add(&self, txn: Transaction) -> ExpenseResult<()>;

    /// Get a transaction by ID
    fn get(&self, id: TransactionId) -> ExpenseResult<Option<Transaction>>;

    /// All transactions for a user, newest recorded first
    fn list_by_user(&self, user_id: &str) -> ExpenseResult<Vec<Transaction>>;

    /// A user's transactions in any of the given categories, newest recorded first
    fn list_by_user_and_categories(
        &self,
        user_id: &str,
        category_ids: &[String],
    ) -> ExpenseResult<Vec<Transaction>>;

    /// A user's transactions that occurred within the inclusive range, newest occurred first
    fn list_by_user_and_period(
        &self,
        user_id: &str,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> ExpenseResult<Vec<Transaction>>;
}

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// JSON-file backed repository with in-memory indexes
pub struct JsonTransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: user_id -> transaction_ids
    by_user: RwLock<HashMap<String, Vec<TransactionId>>>,
}

impl JsonTransactionRepository {
    /// Create a new repository backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build indexes
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_user.clear();

        for txn in file_data.transactions {
            by_user.entry(txn.user_id.clone()).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> ExpenseResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Number of stored transactions
    pub fn len(&self) -> ExpenseResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }

    /// Whether the repository holds no transactions
    pub fn is_empty(&self) -> ExpenseResult<bool> {
        Ok(self.len()? == 0)
    }

    fn user_transactions(&self, user_id: &str) -> ExpenseResult<Vec<Transaction>> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_user = self
            .by_user
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_user.get(user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        Ok(ids.iter().filter_map(|id| data.get(id).cloned()).collect())
    }
}

impl TransactionRepository for JsonTransactionRepository {
    fn add(&self, txn: Transaction) -> ExpenseResult<()> {
        {
            let mut data = self.data.write().map_err(|e| {
                ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            let mut by_user = self.by_user.write().map_err(|e| {
                ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;

            by_user.entry(txn.user_id.clone()).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        self.save()
    }

    fn get(&self, id: TransactionId) -> ExpenseResult<Option<Transaction>> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(&id).cloned())
    }

    fn list_by_user(&self, user_id: &str) -> ExpenseResult<Vec<Transaction>> {
        let mut transactions = self.user_transactions(user_id)?;
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    fn list_by_user_and_categories(
        &self,
        user_id: &str,
        category_ids: &[String],
    ) -> ExpenseResult<Vec<Transaction>> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let wanted: HashSet<&str> = category_ids.iter().map(String::as_str).collect();
        let mut transactions: Vec<_> = self
            .user_transactions(user_id)?
            .into_iter()
            .filter(|t| {
                t.category_id
                    .as_deref()
                    .is_some_and(|c| wanted.contains(c))
            })
            .collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    fn list_by_user_and_period(
        &self,
        user_id: &str,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> ExpenseResult<Vec<Transaction>> {
        let mut transactions: Vec<_> = self
            .user_transactions(user_id)?
            .into_iter()
            .filter(|t| t.occurred_at >= start_at && t.occurred_at <= end_at)
            .collect();
        transactions.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(transactions)
    }
}
