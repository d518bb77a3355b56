//! Core data models for the expense tracker
//!
//! This module contains the data structures that represent the expense
//! tracking domain: money amounts, currencies, and transactions.

pub mod ids;
pub mod money;
pub mod transaction;

pub use ids::TransactionId;
pub use money::{format_cents, Currency, Money, MoneyError};
pub use transaction::{
    Transaction, TransactionKind, TransactionValidationError, UnsupportedKind,
};
