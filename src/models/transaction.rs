//! Transaction model
//!
//! Represents a single expense or income event for a user, with a positive
//! money amount, the moment it occurred, and optional category, account,
//! and description metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Maximum length of a transaction description
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money leaving the user's accounts
    Expense,
    /// Money entering the user's accounts
    Income,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = UnsupportedKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(UnsupportedKind(other.to_string())),
        }
    }
}

/// Error returned when parsing an unknown transaction kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedKind(pub String);

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported transaction type: {}", self.0)
    }
}

impl std::error::Error for UnsupportedKind {}

/// A recorded expense or income event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owner of the transaction
    pub user_id: String,

    /// Expense or income
    pub kind: TransactionKind,

    /// Positive amount with currency
    pub money: Money,

    /// When the transaction happened
    pub occurred_at: DateTime<Utc>,

    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,

    /// Free-form category identifier (e.g. "food")
    #[serde(default)]
    pub category_id: Option<String>,

    /// Free-form account identifier (e.g. "card")
    #[serde(default)]
    pub account_id: Option<String>,

    /// Optional description, at most 500 characters
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new transaction with a fresh ID and creation timestamp
    ///
    /// # Errors
    ///
    /// Returns a validation error if the user id is empty or the
    /// description exceeds the maximum length.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        user_id: impl Into<String>,
        kind: TransactionKind,
        money: Money,
        occurred_at: DateTime<Utc>,
        category_id: Option<String>,
        account_id: Option<String>,
        description: Option<String>,
    ) -> Result<Self, TransactionValidationError> {
        let user_id = user_id.into();
        if user_id.is_empty() {
            return Err(TransactionValidationError::MissingUserId);
        }
        if let Some(desc) = &description {
            if desc.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(TransactionValidationError::DescriptionTooLong {
                    len: desc.chars().count(),
                });
            }
        }

        Ok(Self {
            id: TransactionId::new(),
            user_id,
            kind,
            money,
            occurred_at,
            created_at: Utc::now(),
            category_id,
            account_id,
            description,
        })
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Check if this is an income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.occurred_at.format("%Y-%m-%d"),
            self.kind,
            self.money
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    MissingUserId,
    DescriptionTooLong { len: usize },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUserId => write!(f, "user_id is required"),
            Self::DescriptionTooLong { len } => write!(
                f,
                "description must be at most {} characters, got {}",
                MAX_DESCRIPTION_LEN, len
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::money::Currency;
    use chrono::TimeZone;

    fn money(cents: i64) -> Money {
        Money::new(cents, Currency::new("RUB").unwrap()).unwrap()
    }

    fn occurred() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 22, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_create_success() {
        let txn = Transaction::create(
            "u1",
            TransactionKind::Income,
            money(1550),
            occurred(),
            Some("salary".into()),
            Some("card".into()),
            Some("salary".into()),
        )
        .unwrap();

        assert_eq!(txn.user_id, "u1");
        assert_eq!(txn.kind, TransactionKind::Income);
        assert_eq!(txn.money.cents(), 1550);
        assert_eq!(txn.category_id.as_deref(), Some("salary"));
        assert!(txn.is_income());
        assert!(!txn.is_expense());
    }

    #[test]
    fn test_create_requires_user_id() {
        let result = Transaction::create(
            "",
            TransactionKind::Expense,
            money(100),
            occurred(),
            None,
            None,
            None,
        );
        assert_eq!(result, Err(TransactionValidationError::MissingUserId));
    }

    #[test]
    fn test_create_rejects_long_description() {
        let long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        let result = Transaction::create(
            "u1",
            TransactionKind::Expense,
            money(100),
            occurred(),
            None,
            None,
            Some(long),
        );
        assert!(matches!(
            result,
            Err(TransactionValidationError::DescriptionTooLong { .. })
        ));
    }

    #[test]
    fn test_description_at_limit_accepted() {
        let exact = "x".repeat(MAX_DESCRIPTION_LEN);
        let result = Transaction::create(
            "u1",
            TransactionKind::Expense,
            money(100),
            occurred(),
            None,
            None,
            Some(exact),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("expense".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        assert_eq!("income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);

        let err = "transfer".parse::<TransactionKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported transaction type: transfer");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let txn = Transaction::create(
            "u1",
            TransactionKind::Expense,
            money(1050),
            occurred(),
            Some("food".into()),
            None,
            Some("lunch".into()),
        )
        .unwrap();

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"kind\":\"expense\""));

        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, deserialized);
    }

    #[test]
    fn test_display() {
        let txn = Transaction::create(
            "u1",
            TransactionKind::Expense,
            money(5000),
            occurred(),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(format!("{}", txn), "2026-01-22 expense 50.00 RUB");
    }
}
