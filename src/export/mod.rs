//! Export functionality for transactions

pub mod csv;
pub mod json;

pub use csv::export_transactions_csv;
pub use json::export_transactions_json;
