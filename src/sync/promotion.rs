//! Pre-flight resolution of branch changes and branch existence.

use crate::backend::GitBackend;
use crate::error::{ArborError, Operation, OperationFailure, Result};
use crate::model::WorktreeName;
use crate::plan::{BranchChange, SyncPlan};
use log::{debug, warn};
use std::collections::BTreeSet;

/// When a branch change may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SwitchStep {
    /// Target branch is free.
    Direct,
    /// Target branch is held by this orphan; switch once it is removed.
    AfterRemoval(WorktreeName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PlannedSwitch {
    pub name: WorktreeName,
    pub branch: String,
    pub step: SwitchStep,
}

/// Operations cleared to run, plus names already known to fail.
#[derive(Debug, Default)]
pub(super) struct Preflight {
    pub switches: Vec<PlannedSwitch>,
    pub creates: Vec<(WorktreeName, String)>,
    pub failures: Vec<OperationFailure>,
}

/// Resolve every branch change and creation before anything is mutated.
///
/// `removals` is the set of orphans this execution will remove. A target
/// branch held by any other worktree is a fatal conflict; chains and cycles
/// across several worktrees are not untangled.
pub(super) fn resolve(
    backend: &dyn GitBackend,
    plan: &SyncPlan,
    removals: &BTreeSet<WorktreeName>,
) -> Result<Preflight> {
    let mut preflight = Preflight::default();

    for (name, change) in &plan.branch_changes {
        let holder = backend.worktree_holding(&change.new)?;

        if let Some(target) = mismatched_target(change, holder.as_deref()) {
            warn!(
                "'{}' promotes from '{}', but '{}' is held by {}",
                name,
                target,
                change.new,
                holder.as_deref().unwrap_or("no worktree")
            );
        }

        let step = match holder {
            None => {
                if !check_branch(backend, name, &change.new, &mut preflight.failures)? {
                    continue;
                }
                SwitchStep::Direct
            }
            Some(holder) if removals.contains(&holder) => {
                debug!(
                    "deferring '{}' -> '{}' until '{}' is removed",
                    name, change.new, holder
                );
                SwitchStep::AfterRemoval(holder)
            }
            Some(holder) => {
                return Err(ArborError::BranchInUse {
                    worktree: name.clone(),
                    branch: change.new.clone(),
                    holder,
                });
            }
        };

        preflight.switches.push(PlannedSwitch {
            name: name.clone(),
            branch: change.new.clone(),
            step,
        });
    }

    for (name, branch) in &plan.missing {
        if check_branch(backend, name, branch, &mut preflight.failures)? {
            preflight.creates.push((name.clone(), branch.clone()));
        }
    }

    Ok(preflight)
}

/// Declared promotion target, when it is not the worktree actually holding
/// the new branch.
pub(super) fn mismatched_target<'a>(
    change: &'a BranchChange,
    holder: Option<&str>,
) -> Option<&'a str> {
    change
        .promotion_target
        .as_deref()
        .filter(|target| holder != Some(*target))
}

fn check_branch(
    backend: &dyn GitBackend,
    name: &str,
    branch: &str,
    failures: &mut Vec<OperationFailure>,
) -> Result<bool> {
    if backend.branch_exists(branch)? {
        return Ok(true);
    }
    failures.push(OperationFailure {
        name: name.to_string(),
        operation: Operation::CheckBranch,
        cause: format!("branch '{}' does not exist", branch),
    });
    Ok(false)
}
