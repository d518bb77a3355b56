//! Dev task execution
//!
//! Resolves task dependencies depth-first (each task at most once per
//! invocation), runs steps in order, and stops at the first nonzero exit
//! status. The wrapped tool's own exit code is what the caller propagates.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{ExpenseError, ExpenseResult};

use super::task::{CommandSpec, Step, Task};

/// Seam for spawning external commands
///
/// Production code uses [`SystemRunner`]; tests substitute a recording
/// implementation to observe execution order and inject failures.
pub trait CommandRunner {
    /// Run the command to completion, returning its exit code
    fn run(&mut self, spec: &CommandSpec) -> ExpenseResult<i32>;
}

/// Spawns commands as real child processes, inheriting stdio
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec) -> ExpenseResult<i32> {
        let status = Command::new(&spec.program)
            .args(&spec.args)
            .status()
            .map_err(|e| ExpenseError::Task(format!("Failed to spawn '{}': {}", spec, e)))?;

        // A signal-terminated child has no code; report it as failure
        Ok(status.code().unwrap_or(-1))
    }
}

/// Executes named tasks with dependency ordering and fail-fast semantics
pub struct TaskRunner<R: CommandRunner> {
    tasks: Vec<Task>,
    runner: R,
}

impl<R: CommandRunner> TaskRunner<R> {
    /// Create a runner over a task registry
    pub fn new(tasks: Vec<Task>, runner: R) -> Self {
        Self { tasks, runner }
    }

    /// All registered tasks, in registry order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Run a target and everything it depends on
    ///
    /// Dependencies run before the target, each at most once. The first
    /// failing step aborts the whole invocation.
    pub fn run_target(&mut self, name: &str) -> ExpenseResult<()> {
        let mut done = HashSet::new();
        self.run_with_done(name, &mut done)
    }

    fn run_with_done(&mut self, name: &str, done: &mut HashSet<&'static str>) -> ExpenseResult<()> {
        let task = self
            .tasks
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| ExpenseError::task_not_found(name))?;

        if done.contains(task.name) {
            return Ok(());
        }
        done.insert(task.name);

        for dep in &task.deps {
            self.run_with_done(dep, done)?;
        }

        for step in &task.steps {
            match step {
                Step::Run(spec) => {
                    let code = self.runner.run(spec)?;
                    if code != 0 {
                        return Err(ExpenseError::TaskFailed {
                            task: task.name.to_string(),
                            step: spec.to_string(),
                            code,
                        });
                    }
                }
                Step::CleanDir(path) => clean_dir(path)?,
            }
        }

        Ok(())
    }
}

/// Remove a directory tree if present and recreate it empty
fn clean_dir(path: &Path) -> ExpenseResult<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| {
            ExpenseError::Task(format!("Failed to clean {}: {}", path.display(), e))
        })?;
    }
    fs::create_dir_all(path)
        .map_err(|e| ExpenseError::Task(format!("Failed to create {}: {}", path.display(), e)))?;
    Ok(())
}
