use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker_cli::cli::{
    handle_export_command, handle_transaction_command, ExportCommands, TransactionCommands,
};
use expense_tracker_cli::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Record expense and income transactions, query them by \
                  category or time period, and export them, all from the \
                  command line. Data lives in local JSON files."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Export transactions
    #[command(subcommand)]
    Export(ExportCommands),

    /// Initialize storage
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.data_dir().display());
            expense_tracker_cli::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'expense transaction add expense 10.50 --category food' to record");
            println!("your first transaction, and 'expense transaction list' to see it.");
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Active user:      {}", settings.default_user);
            println!("  Default currency: {}", settings.default_currency);
            println!("  Date format:      {}", settings.date_format);
        }
        None => {
            println!("Expense Tracker - terminal-based expense tracking");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense init' to set up storage.");
        }
    }

    Ok(())
}
