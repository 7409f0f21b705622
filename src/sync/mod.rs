//! Sync executor: applies a [`SyncPlan`](crate::plan::SyncPlan) to a backend.
//!
//! # Ordering
//!
//! 1. Dry run returns the plan untouched; no mutating call is issued.
//! 2. Pre-flight (read-only) resolves every branch change against the worktree
//!    currently holding its target branch. A holder that is not being removed
//!    is a fatal [`BranchInUse`](crate::error::ArborError::BranchInUse).
//! 3. Orphans are removed only with `force`, after a single confirmation
//!    covering all of them. Rejection aborts before any mutation.
//! 4. Branch changes: direct switches first, then promotions whose donor
//!    worktree was removed in step 3.
//! 5. Missing worktrees are created.
//!
//! Failures in steps 3 to 5 are collected and reported together; successful
//! operations are kept.

mod executor;
mod promotion;


pub use executor::execute;

use crate::model::WorktreeName;
use crate::plan::SyncPlan;
use serde::Serialize;

/// Caller-supplied confirmation gate for destructive operations.
pub type ConfirmFn<'a> = dyn FnMut(&str) -> bool + 'a;

/// Execution switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Report the plan without mutating anything.
    pub dry_run: bool,
    /// Remove orphaned worktrees (after confirmation).
    pub force: bool,
}

/// Operations applied by a successful execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub removed: Vec<WorktreeName>,
    pub switched: Vec<WorktreeName>,
    pub created: Vec<WorktreeName>,
    /// Orphans left in place because `force` was not set.
    pub kept_orphans: Vec<WorktreeName>,
    pub in_sync: Vec<WorktreeName>,
}

impl SyncSummary {
    /// Number of mutations that were applied.
    pub fn applied(&self) -> usize {
        self.removed.len() + self.switched.len() + self.created.len()
    }
}

/// Result of [`execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Dry run: the plan that would have been applied.
    DryRun(SyncPlan),
    Applied(SyncSummary),
}
