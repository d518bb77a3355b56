//! Dev-workflow runner
//!
//! Runs named development targets (tests, lint, coverage, report
//! generation) by invoking the underlying tools, propagating their exit
//! codes. `report-open` additionally serves the generated report over HTTP.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use expense_tracker_cli::tasks::{
    builtin_tasks, PreviewConfig, PreviewServer, SystemRunner, TaskRunner, REPORT_DIR,
};
use expense_tracker_cli::ExpenseError;

#[derive(Parser)]
#[command(
    name = "expense-dev",
    version,
    about = "Run development workflow targets",
    after_help = "Run with --list to see all targets."
)]
struct Cli {
    /// Target to run (e.g. check, test, report)
    target: Option<String>,

    /// List available targets
    #[arg(short, long)]
    list: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut runner = TaskRunner::new(builtin_tasks(), SystemRunner);

    if cli.list || cli.target.is_none() {
        println!("Available targets:");
        for task in runner.tasks() {
            println!("  {:16} {}", task.name, task.description);
        }
        return ExitCode::SUCCESS;
    }

    let target = cli.target.expect("target checked above");
    let result = match target.as_str() {
        // After the report is built, serve it until interrupted
        "report-open" => runner.run_target("report").and_then(|_| serve_report()),
        other => runner.run_target(other),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            // Propagate the wrapped tool's own exit code where there is one
            match err {
                ExpenseError::TaskFailed { code, .. } if (1..=255).contains(&code) => {
                    ExitCode::from(code as u8)
                }
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn serve_report() -> Result<(), ExpenseError> {
    let config = PreviewConfig::from_env()?;
    let server = PreviewServer::bind(&config, PathBuf::from(REPORT_DIR))?;
    println!(
        "Serving {} on http://{} (Ctrl-C to stop)",
        REPORT_DIR,
        server.local_addr()?
    );
    server.serve_forever()
}
