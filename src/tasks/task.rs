//! Dev task model
//!
//! A task is a named dev-workflow target: a list of prerequisite tasks plus
//! an ordered list of steps. Steps either invoke an external tool or reset
//! an output directory. The runner performs no recovery or retry; a failing
//! step's exit status is the task's result.

use std::fmt;
use std::path::PathBuf;

/// An external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build a spec from a program and its arguments
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// A single step of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Run an external command, propagating its exit status
    Run(CommandSpec),
    /// Remove a directory and recreate it empty
    CleanDir(PathBuf),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Run(spec) => write!(f, "{}", spec),
            Step::CleanDir(path) => write!(f, "clean {}", path.display()),
        }
    }
}

/// A named dev-workflow target
#[derive(Debug, Clone)]
pub struct Task {
    /// Target name used on the command line
    pub name: &'static str,
    /// One-line description shown in the target listing
    pub description: &'static str,
    /// Prerequisite tasks, executed in order before this task's steps
    pub deps: Vec<&'static str>,
    /// Steps executed in order, stopping at the first failure
    pub steps: Vec<Step>,
}

impl Task {
    /// Create a task with no prerequisites
    pub fn new(name: &'static str, description: &'static str, steps: Vec<Step>) -> Self {
        Self {
            name,
            description,
            deps: Vec::new(),
            steps,
        }
    }

    /// Add prerequisite tasks
    pub fn with_deps(mut self, deps: &[&'static str]) -> Self {
        self.deps = deps.to_vec();
        self
    }
}
