//! Error types for arbor.
//!
//! Uses thiserror for derive macros. Every variant names the worktree and
//! operation it concerns so the CLI can report failures precisely.

use crate::exit_codes;
use std::fmt;
use thiserror::Error;

/// The kind of operation an [`OperationFailure`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Checking that a target branch exists.
    CheckBranch,
    /// Creating a new worktree.
    Create,
    /// Switching a worktree to another branch.
    Switch,
    /// Removing an orphaned worktree.
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::CheckBranch => "check branch",
            Operation::Create => "create",
            Operation::Switch => "switch",
            Operation::Remove => "remove",
        };
        f.write_str(s)
    }
}

/// A single failed operation collected during sync execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    /// Worktree the operation targeted.
    pub name: String,
    /// What was being attempted.
    pub operation: Operation,
    /// Human-readable cause.
    pub cause: String,
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.operation, self.name, self.cause)
    }
}

/// Main error type for arbor operations.
#[derive(Error, Debug)]
pub enum ArborError {
    /// A git backend call failed.
    #[error("git {operation} failed: {message}")]
    Backend { operation: String, message: String },

    /// A branch change targets a branch checked out in a worktree that stays.
    #[error(
        "cannot switch '{worktree}' to '{branch}': branch is checked out in '{holder}', \
         which is not scheduled for removal"
    )]
    BranchInUse {
        worktree: String,
        branch: String,
        holder: String,
    },

    /// The user declined the confirmation prompt.
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// Some independent operations failed while others were applied.
    #[error("{} operation(s) failed ({applied} applied):{}", failures.len(), format_failures(failures))]
    PartialExecution {
        failures: Vec<OperationFailure>,
        applied: usize,
    },

    /// No single worktree matched a fragment.
    #[error("{}", not_found_message(fragment, candidates))]
    NotFound {
        fragment: String,
        candidates: Vec<String>,
    },

    /// Invalid arguments, config, or environment.
    #[error("{0}")]
    UserError(String),
}

impl ArborError {
    /// Build a backend error from the operation label and cause.
    pub fn backend(operation: impl Into<String>, message: impl fmt::Display) -> Self {
        ArborError::Backend {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArborError::Backend { .. } => exit_codes::GIT_FAILURE,
            ArborError::BranchInUse { .. } => exit_codes::BRANCH_CONFLICT,
            ArborError::Cancelled(_) => exit_codes::CANCELLED,
            ArborError::PartialExecution { .. } => exit_codes::PARTIAL_FAILURE,
            ArborError::NotFound { .. } => exit_codes::USER_ERROR,
            ArborError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

fn format_failures(failures: &[OperationFailure]) -> String {
    failures.iter().map(|f| format!("\n  - {}", f)).collect()
}

fn not_found_message(fragment: &str, candidates: &[String]) -> String {
    if candidates.is_empty() {
        format!("no worktree matches '{}'", fragment)
    } else {
        format!(
            "'{}' is ambiguous; candidates: {}",
            fragment,
            candidates.join(", ")
        )
    }
}

/// Result type alias for arbor operations.
pub type Result<T> = std::result::Result<T, ArborError>;
