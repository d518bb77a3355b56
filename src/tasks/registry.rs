//! Built-in dev-workflow targets
//!
//! The target table maps names to external tool invocations, mirroring the
//! project's development workflow: dependency install, dev server, tests,
//! coverage, static checks, commit hooks, and test-report generation.

use std::path::PathBuf;

use super::task::{CommandSpec, Step, Task};

/// Where the test runner writes structured (JUnit) results
pub const RESULTS_DIR: &str = "target/nextest/ci";

/// Where the HTML report is generated
pub const REPORT_DIR: &str = "target/test-report";

/// Minimum line coverage accepted by the coverage gate
pub const COVERAGE_THRESHOLD: &str = "80";

fn run(program: &str, args: &[&str]) -> Step {
    Step::Run(CommandSpec::new(program, args))
}

/// Build the registry of built-in targets
pub fn builtin_tasks() -> Vec<Task> {
    vec![
        Task::new(
            "install",
            "Fetch manifest dependencies",
            vec![run("cargo", &["fetch"])],
        ),
        Task::new(
            "run",
            "Start the application with auto-reload (runs until interrupted)",
            vec![run("cargo", &["watch", "-x", "run"])],
        ),
        Task::new(
            "test",
            "Run the test suite quietly",
            vec![run("cargo", &["test", "--quiet"])],
        ),
        Task::new(
            "test-cov",
            "Run the test suite with a line-coverage threshold",
            vec![run(
                "cargo",
                &["llvm-cov", "--fail-under-lines", COVERAGE_THRESHOLD],
            )],
        ),
        Task::new(
            "typecheck",
            "Type-check every source tree without building artifacts",
            vec![run("cargo", &["check", "--workspace", "--all-targets"])],
        ),
        Task::new(
            "lint",
            "Run the linter and format check (no mutation)",
            vec![
                run("cargo", &["clippy", "--all-targets", "--", "-D", "warnings"]),
                run("cargo", &["fmt", "--check"]),
            ],
        ),
        Task::new(
            "format",
            "Rewrite code via the formatter and auto-fixing linter",
            vec![
                run("cargo", &["fmt"]),
                run("cargo", &["clippy", "--fix", "--allow-dirty", "--allow-staged"]),
            ],
        ),
        Task::new(
            "hooks-install",
            "Install commit-time hook scripts",
            vec![run("pre-commit", &["install"])],
        ),
        Task::new(
            "hooks-run",
            "Run all configured hooks against all files",
            vec![run("pre-commit", &["run", "--all-files"])],
        ),
        Task::new(
            "results",
            "Run tests, writing structured results to the results directory",
            vec![run("cargo", &["nextest", "run", "--profile", "ci"])],
        ),
        Task::new(
            "report",
            "Build the HTML test report from collected results",
            vec![
                Step::CleanDir(PathBuf::from(REPORT_DIR)),
                run("allure", &["generate", RESULTS_DIR, "-o", REPORT_DIR, "--clean"]),
            ],
        )
        .with_deps(&["results"]),
        Task::new(
            "report-open",
            "Serve the report over HTTP (REPORT_HOST/REPORT_PORT, runs until interrupted)",
            vec![],
        )
        .with_deps(&["report"]),
        Task::new(
            "report-open-cli",
            "Open the report via the external report viewer",
            vec![run("allure", &["open", REPORT_DIR])],
        )
        .with_deps(&["report"]),
        Task::new(
            "check",
            "Run lint, then typecheck, then test, stopping at the first failure",
            vec![],
        )
        .with_deps(&["lint", "typecheck", "test"]),
    ]
}
