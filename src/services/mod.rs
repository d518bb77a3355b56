//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, aggregation, and audit logging.

pub mod transaction;

pub use transaction::{
    CategorySpendingSummary, CategoryTotal, PeriodSpendingSummary, PeriodTotal,
    RecordTransactionInput, TransactionService,
};
