//! Storage initialization
//!
//! Creates the directory layout and an empty transactions file on first run.

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseResult;

use super::transactions::JsonTransactionRepository;

/// Initialize storage for a fresh installation
///
/// Safe to call on an already-initialized directory: existing data is left
/// untouched.
pub fn initialize_storage(paths: &ExpensePaths) -> ExpenseResult<()> {
    paths.ensure_directories()?;

    let repo = JsonTransactionRepository::new(paths.transactions_file());
    if !paths.transactions_file().exists() {
        repo.save()?;
    }

    Ok(())
}
