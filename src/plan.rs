//! Reconciliation planner.
//!
//! Pure function from (desired mapping, actual state) to a [`SyncPlan`].
//! Classification depends only on name membership and branch equality;
//! dirty/ahead/behind counts never influence the plan.

use crate::model::{ActualState, DesiredMapping, WorktreeName};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A worktree that must move to another branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchChange {
    pub old: String,
    pub new: String,
    /// Worktree the desired entry expects to inherit `new` from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_target: Option<WorktreeName>,
}

/// Classified difference between desired and actual worktrees.
///
/// The four parts are disjoint and together cover every name that appears in
/// either input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    /// Desired but absent; value is the branch to create the worktree on.
    pub missing: BTreeMap<WorktreeName, String>,
    pub branch_changes: BTreeMap<WorktreeName, BranchChange>,
    /// Present but no longer desired.
    pub orphaned: BTreeSet<WorktreeName>,
    pub in_sync: BTreeSet<WorktreeName>,
}

impl SyncPlan {
    /// True when nothing needs to be created, switched, or removed.
    pub fn is_converged(&self) -> bool {
        self.missing.is_empty() && self.branch_changes.is_empty() && self.orphaned.is_empty()
    }

    /// Total number of worktree names covered by the plan.
    pub fn len(&self) -> usize {
        self.missing.len() + self.branch_changes.len() + self.orphaned.len() + self.in_sync.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute the sync plan for `desired` against `actual`.
pub fn plan(desired: &DesiredMapping, actual: &ActualState) -> SyncPlan {
    let mut plan = SyncPlan::default();

    for (name, entry) in desired {
        match actual.get(name) {
            None => {
                plan.missing.insert(name.clone(), entry.branch.clone());
            }
            Some(current) if current.current_branch != entry.branch => {
                plan.branch_changes.insert(
                    name.clone(),
                    BranchChange {
                        old: current.current_branch.clone(),
                        new: entry.branch.clone(),
                        promotion_target: entry.promotion_target.clone(),
                    },
                );
            }
            Some(_) => {
                plan.in_sync.insert(name.clone());
            }
        }
    }

    plan.orphaned = actual
        .keys()
        .filter(|name| !desired.contains_key(*name))
        .cloned()
        .collect();

    debug!(
        "plan: {} missing, {} branch change(s), {} orphaned, {} in sync",
        plan.missing.len(),
        plan.branch_changes.len(),
        plan.orphaned.len(),
        plan.in_sync.len()
    );
    plan
}
