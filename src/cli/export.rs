//! Export CLI commands

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_transactions_csv, export_transactions_json};
use crate::services::TransactionService;
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export transactions as CSV
    Csv {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export transactions as JSON
    Json {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> ExpenseResult<()> {
    let service = TransactionService::new(storage);
    let transactions = service.list_transactions(&settings.default_user)?;

    match cmd {
        ExportCommands::Csv { output } => match output {
            Some(path) => {
                export_transactions_csv(&transactions, create_file(&path)?)?;
                eprintln!("Exported {} transactions to {}", transactions.len(), path.display());
            }
            None => export_transactions_csv(&transactions, io::stdout().lock())?,
        },
        ExportCommands::Json { output } => match output {
            Some(path) => {
                export_transactions_json(&transactions, create_file(&path)?)?;
                eprintln!("Exported {} transactions to {}", transactions.len(), path.display());
            }
            None => export_transactions_json(&transactions, io::stdout().lock())?,
        },
    }

    Ok(())
}

fn create_file(path: &Path) -> ExpenseResult<impl Write> {
    File::create(path)
        .map_err(|e| ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e)))
}
