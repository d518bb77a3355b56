//! Terminal display formatting

pub mod summary;
pub mod transaction;

pub use summary::{format_category_summary, format_period_summary};
pub use transaction::{format_transaction_details, format_transaction_register};
